//! Standalone 3D visualization page for a packing result.
//!
//! Produces a self-contained HTML document that embeds the packed boxes as
//! JSON and renders them with three.js, one wireframe per committed box with
//! its placements as colored cuboids.

use packer_core::{BoxType, PackedBox};
use serde_json::json;

/// Renders the full HTML document for a set of committed boxes.
pub fn render_html(packed_boxes: &[PackedBox], boxes: &[BoxType]) -> String {
    let scenes: Vec<serde_json::Value> = packed_boxes
        .iter()
        .map(|packed| {
            let dims = boxes
                .iter()
                .find(|b| b.id == packed.box_id)
                .map(|b| (b.w, b.h, b.d))
                .unwrap_or((0, 0, 0));

            json!({
                "box_id": packed.box_id,
                "w": dims.0,
                "h": dims.1,
                "d": dims.2,
                "contents": packed.contents,
            })
        })
        .collect();

    let total_box_volume: u64 = packed_boxes
        .iter()
        .filter_map(|packed| boxes.iter().find(|b| b.id == packed.box_id))
        .map(|b| b.volume())
        .sum();
    let total_item_volume: u64 = packed_boxes
        .iter()
        .flat_map(|b| &b.contents)
        .map(|p| p.volume())
        .sum();
    let item_count: usize = packed_boxes.iter().map(|b| b.contents.len()).sum();
    let utilization = if total_box_volume > 0 {
        total_item_volume as f64 / total_box_volume as f64 * 100.0
    } else {
        0.0
    };

    let data = serde_json::to_string(&scenes).unwrap_or_else(|_| "[]".to_string());

    TEMPLATE
        .replace("__PACKING_DATA__", &data)
        .replace("__BOX_COUNT__", &packed_boxes.len().to_string())
        .replace("__ITEM_COUNT__", &item_count.to_string())
        .replace("__TOTAL_VOLUME__", &total_box_volume.to_string())
        .replace("__UTILIZATION__", &format!("{utilization:.1}"))
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>3D Packing Result</title>
<style>
    :root {
        --bg-primary: #0f0f1a;
        --bg-secondary: #1a1a2e;
        --text-primary: #e8e8f0;
        --text-secondary: #a0a0b8;
        --accent: #818cf8;
        --success: #22c55e;
        --border-color: #3a3a5c;
    }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
        font-family: 'Inter', 'Segoe UI', system-ui, sans-serif;
        background: var(--bg-primary);
        overflow: hidden;
        color: var(--text-primary);
    }
    #container { width: 100vw; height: 100vh; }
    #info {
        position: absolute;
        top: 20px;
        left: 20px;
        background: var(--bg-secondary);
        padding: 20px;
        border-radius: 16px;
        max-width: 280px;
        z-index: 100;
        border: 1px solid var(--border-color);
    }
    #info h2 { color: var(--accent); margin-bottom: 16px; font-size: 18px; }
    .stat {
        display: flex;
        justify-content: space-between;
        padding: 10px 0;
        border-bottom: 1px solid var(--border-color);
        font-size: 13px;
    }
    .stat:last-child { border-bottom: none; }
    .stat-label { color: var(--text-secondary); }
    .stat-value { font-weight: 600; }
    .stat-value.highlight { color: var(--success); }
    #hint {
        position: absolute;
        bottom: 20px;
        left: 20px;
        color: var(--text-secondary);
        font-size: 12px;
        z-index: 100;
    }
</style>
</head>
<body>
<div id="container"></div>
<div id="info">
    <h2>Packing Result</h2>
    <div class="stat"><span class="stat-label">Boxes</span><span class="stat-value">__BOX_COUNT__</span></div>
    <div class="stat"><span class="stat-label">Items placed</span><span class="stat-value">__ITEM_COUNT__</span></div>
    <div class="stat"><span class="stat-label">Total box volume</span><span class="stat-value">__TOTAL_VOLUME__</span></div>
    <div class="stat"><span class="stat-label">Utilization</span><span class="stat-value highlight">__UTILIZATION__%</span></div>
</div>
<div id="hint">Drag to rotate &middot; scroll to zoom</div>
<script src="https://unpkg.com/three@0.152.2/build/three.min.js"></script>
<script>
    const packedBoxes = __PACKING_DATA__;

    const scene = new THREE.Scene();
    scene.background = new THREE.Color(0x0f0f1a);

    const camera = new THREE.PerspectiveCamera(50, innerWidth / innerHeight, 0.1, 10000);
    const renderer = new THREE.WebGLRenderer({ antialias: true });
    renderer.setSize(innerWidth, innerHeight);
    document.getElementById('container').appendChild(renderer.domElement);

    scene.add(new THREE.AmbientLight(0xffffff, 0.6));
    const light = new THREE.DirectionalLight(0xffffff, 0.8);
    light.position.set(1, 2, 1.5);
    scene.add(light);

    function itemColor(id) {
        let hash = 0;
        for (let i = 0; i < id.length; i++) hash = (hash * 31 + id.charCodeAt(i)) >>> 0;
        return new THREE.Color().setHSL((hash % 360) / 360, 0.65, 0.55);
    }

    const gap = 10;
    let offsetX = 0;
    let maxDim = 1;

    for (const box of packedBoxes) {
        const group = new THREE.Group();
        group.position.x = offsetX;

        const frame = new THREE.LineSegments(
            new THREE.EdgesGeometry(new THREE.BoxGeometry(box.w, box.h, box.d)),
            new THREE.LineBasicMaterial({ color: 0x818cf8 })
        );
        frame.position.set(box.w / 2, box.h / 2, box.d / 2);
        group.add(frame);

        for (const item of box.contents) {
            const mesh = new THREE.Mesh(
                new THREE.BoxGeometry(item.w, item.h, item.d),
                new THREE.MeshLambertMaterial({
                    color: itemColor(item.item_id),
                    transparent: true,
                    opacity: 0.85,
                })
            );
            mesh.position.set(item.x + item.w / 2, item.y + item.h / 2, item.z + item.d / 2);
            group.add(mesh);

            const edges = new THREE.LineSegments(
                new THREE.EdgesGeometry(mesh.geometry),
                new THREE.LineBasicMaterial({ color: 0x0f0f1a })
            );
            edges.position.copy(mesh.position);
            group.add(edges);
        }

        scene.add(group);
        offsetX += box.w + gap;
        maxDim = Math.max(maxDim, box.w, box.h, box.d);
    }

    const center = new THREE.Vector3(Math.max(offsetX - gap, 1) / 2, maxDim / 2, maxDim / 2);
    let distance = Math.max(offsetX, maxDim) * 1.8;
    let theta = Math.PI / 4;
    let phi = Math.PI / 3;

    function positionCamera() {
        camera.position.set(
            center.x + distance * Math.sin(phi) * Math.cos(theta),
            center.y + distance * Math.cos(phi),
            center.z + distance * Math.sin(phi) * Math.sin(theta)
        );
        camera.lookAt(center);
    }

    let dragging = false;
    addEventListener('mousedown', () => { dragging = true; });
    addEventListener('mouseup', () => { dragging = false; });
    addEventListener('mousemove', (e) => {
        if (!dragging) return;
        theta += e.movementX * 0.005;
        phi = Math.min(Math.max(phi - e.movementY * 0.005, 0.1), Math.PI - 0.1);
    });
    addEventListener('wheel', (e) => {
        distance = Math.min(Math.max(distance + e.deltaY * distance * 0.001, maxDim * 0.5), maxDim * 20);
    });
    addEventListener('resize', () => {
        camera.aspect = innerWidth / innerHeight;
        camera.updateProjectionMatrix();
        renderer.setSize(innerWidth, innerHeight);
    });

    function animate() {
        requestAnimationFrame(animate);
        if (!dragging) theta += 0.002;
        positionCamera();
        renderer.render(scene, camera);
    }
    animate();
</script>
</body>
</html>"##;
