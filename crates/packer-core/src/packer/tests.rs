use super::*;

fn item(id: &str, w: u32, h: u32, d: u32, quantity: u32) -> Item {
    Item {
        id: id.to_string(),
        w,
        h,
        d,
        quantity,
    }
}

fn box_type(id: &str, w: u32, h: u32, d: u32) -> BoxType {
    BoxType {
        id: id.to_string(),
        w,
        h,
        d,
    }
}

fn run(items: Vec<Item>, boxes: Vec<BoxType>) -> PackResult {
    let packer = Packer::new(PackRequest { items, boxes }).unwrap();
    packer.pack().unwrap()
}

fn unit_count(items: &[Item]) -> u32 {
    items.iter().map(|i| i.quantity).sum()
}

/// Every pair of placements in every box must be disjoint, and every
/// placement must stay within its box's bounds.
fn assert_no_overlap_and_bounds(result: &PackResult, boxes: &[BoxType]) {
    for packed in &result.packed_boxes {
        let bt = boxes.iter().find(|b| b.id == packed.box_id).unwrap();

        for p in &packed.contents {
            assert!(
                p.x + p.w <= bt.w && p.y + p.h <= bt.h && p.z + p.d <= bt.d,
                "placement of '{}' out of bounds in '{}'",
                p.item_id,
                packed.box_id
            );
        }

        for (i, a) in packed.contents.iter().enumerate() {
            for b in &packed.contents[i + 1..] {
                assert!(
                    !geometry::intersects(a, b.x, b.y, b.z, b.w, b.h, b.d),
                    "'{}' and '{}' overlap in '{}'",
                    a.item_id,
                    b.item_id,
                    packed.box_id
                );
            }
        }
    }
}

#[test]
fn test_pack_everything_into_single_best_box() {
    // The large box can take every item; the small one cannot hold item-b
    // at all, so the large box packs strictly more volume and wins.
    let items = vec![
        item("item-b", 20, 20, 20, 1),
        item("item-a", 10, 10, 10, 2),
        item("item-c", 5, 5, 5, 5),
    ];
    let boxes = vec![box_type("box-small", 15, 15, 15), box_type("box-large", 30, 30, 30)];

    let result = run(items, boxes.clone());

    assert!(result.unpacked_items.is_empty());
    assert_eq!(result.packed_boxes.len(), 1);
    assert_eq!(result.packed_boxes[0].box_id, "box-large");
    assert_eq!(result.packed_boxes[0].contents.len(), 8);
    assert_no_overlap_and_bounds(&result, &boxes);
}

#[test]
fn test_pack_splits_across_boxes() {
    // The medium box holds exactly one 20x20x20 item, so the two items must
    // be committed into two instances of the same box type.
    let items = vec![
        item("item-big-1", 20, 20, 20, 1),
        item("item-big-2", 20, 20, 20, 1),
    ];
    let boxes = vec![box_type("box-medium", 25, 25, 25)];

    let result = run(items, boxes);

    assert!(result.unpacked_items.is_empty());
    assert_eq!(result.packed_boxes.len(), 2);
    assert_eq!(result.packed_boxes[0].box_id, "box-medium");
    assert_eq!(result.packed_boxes[1].box_id, "box-medium");
    assert_eq!(result.packed_boxes[0].contents.len(), 1);
    assert_eq!(result.packed_boxes[1].contents.len(), 1);
}

#[test]
fn test_rotation_aligns_long_axis() {
    // (50, 5, 5) only fits the 10x60x10 box when its long side is rotated
    // onto the box's 60-length axis.
    let items = vec![item("item-long", 50, 5, 5, 1)];
    let boxes = vec![box_type("box-tall", 10, 60, 10)];

    let result = run(items, boxes);

    assert!(result.unpacked_items.is_empty());
    assert_eq!(result.packed_boxes.len(), 1);

    let placement = &result.packed_boxes[0].contents[0];
    let mut dims = [placement.w, placement.h, placement.d];
    dims.sort_unstable();
    assert_eq!(dims, [5, 5, 50]);
    assert_eq!(placement.h, 50);
}

#[test]
fn test_exact_fill_without_slack() {
    // Eight 10-cubes tile the 20-cube exactly.
    let items = vec![item("cube", 10, 10, 10, 8)];
    let boxes = vec![box_type("box", 20, 20, 20)];

    let result = run(items, boxes.clone());

    assert!(result.unpacked_items.is_empty());
    assert_eq!(result.packed_boxes.len(), 1);
    assert_eq!(result.packed_boxes[0].contents.len(), 8);
    assert_no_overlap_and_bounds(&result, &boxes);
    assert_eq!(result.summary.total_box_volume, 8000);
    assert_eq!(result.summary.total_item_volume, 8000);
    assert!((result.summary.utilization_percent - 100.0).abs() < 1e-9);
}

#[test]
fn test_oversized_item_reported_unpacked() {
    let items = vec![item("item-huge", 100, 100, 100, 1)];
    let boxes = vec![box_type("box-small", 15, 15, 15)];

    let result = run(items, boxes);

    assert!(result.packed_boxes.is_empty());
    assert_eq!(result.unpacked_items.len(), 1);
    assert_eq!(result.unpacked_items[0].id, "item-huge");
    assert_eq!(result.unpacked_items[0].quantity, 1);
    assert_eq!(result.summary.total_box_volume, 0);
    assert_eq!(result.summary.utilization_percent, 0.0);
}

#[test]
fn test_unpacked_units_aggregate_by_item_id() {
    // The huge items fit nowhere; the small ones still get packed.
    let items = vec![item("item-huge", 30, 30, 30, 2), item("item-small", 5, 5, 5, 3)];
    let boxes = vec![box_type("box", 10, 10, 10)];

    let result = run(items, boxes);

    let placed: usize = result.packed_boxes.iter().map(|b| b.contents.len()).sum();
    assert_eq!(placed, 3);
    assert_eq!(result.unpacked_items.len(), 1);
    assert_eq!(result.unpacked_items[0].id, "item-huge");
    assert_eq!(result.unpacked_items[0].quantity, 2);
}

#[test]
fn test_unit_conservation() {
    let items = vec![
        item("a", 7, 3, 4, 6),
        item("b", 12, 12, 2, 3),
        item("c", 9, 9, 9, 4),
        item("d", 40, 40, 40, 2),
    ];
    let boxes = vec![box_type("small", 14, 14, 14), box_type("big", 22, 22, 22)];

    let result = run(items.clone(), boxes.clone());

    let placed: u32 = result
        .packed_boxes
        .iter()
        .map(|b| b.contents.len() as u32)
        .sum();
    assert_eq!(placed + unit_count(&result.unpacked_items), unit_count(&items));
    assert_no_overlap_and_bounds(&result, &boxes);
}

#[test]
fn test_placements_are_rotations_of_the_source_item() {
    let items = vec![item("slab", 8, 3, 5, 10)];
    let boxes = vec![box_type("crate", 16, 10, 11)];

    let result = run(items, boxes);

    for packed in &result.packed_boxes {
        for p in &packed.contents {
            let mut dims = [p.w, p.h, p.d];
            dims.sort_unstable();
            assert_eq!(dims, [3, 5, 8]);
        }
    }
}

#[test]
fn test_pack_is_deterministic() {
    let items = vec![
        item("a", 6, 4, 9, 5),
        item("b", 9, 9, 9, 2),
        item("c", 3, 3, 3, 7),
    ];
    let boxes = vec![box_type("s", 12, 12, 12), box_type("l", 20, 18, 16)];

    let first = run(items.clone(), boxes.clone());
    let second = run(items, boxes);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_items_is_a_valid_terminal_state() {
    let result = run(Vec::new(), vec![box_type("box", 10, 10, 10)]);

    assert!(result.packed_boxes.is_empty());
    assert!(result.unpacked_items.is_empty());
}

#[test]
fn test_no_boxes_leaves_everything_unpacked() {
    let result = run(vec![item("a", 2, 2, 2, 3)], Vec::new());

    assert!(result.packed_boxes.is_empty());
    assert_eq!(result.unpacked_items.len(), 1);
    assert_eq!(result.unpacked_items[0].quantity, 3);
}

#[test]
fn test_zero_quantity_contributes_nothing() {
    let result = run(
        vec![item("ghost", 5, 5, 5, 0), item("real", 5, 5, 5, 1)],
        vec![box_type("box", 10, 10, 10)],
    );

    assert!(result.unpacked_items.is_empty());
    let placed: usize = result.packed_boxes.iter().map(|b| b.contents.len()).sum();
    assert_eq!(placed, 1);
    assert_eq!(result.packed_boxes[0].contents[0].item_id, "real");
}

#[test]
fn test_volume_tie_prefers_smaller_box() {
    // Both boxes can hold the single item, so the packed volumes tie and the
    // smaller box must win.
    let items = vec![item("a", 5, 5, 5, 1)];
    let boxes = vec![box_type("big", 40, 40, 40), box_type("small", 10, 10, 10)];

    let result = run(items, boxes);

    assert_eq!(result.packed_boxes.len(), 1);
    assert_eq!(result.packed_boxes[0].box_id, "small");
}

#[test]
fn test_rejects_zero_dimension_item() {
    let result = Packer::new(PackRequest {
        items: vec![item("flat", 10, 0, 10, 1)],
        boxes: vec![box_type("box", 10, 10, 10)],
    });

    assert!(matches!(result, Err(PackerError::InvalidInput(_))));
}

#[test]
fn test_rejects_zero_dimension_box() {
    let result = Packer::new(PackRequest {
        items: vec![item("a", 1, 1, 1, 1)],
        boxes: vec![box_type("line", 10, 10, 0)],
    });

    assert!(matches!(result, Err(PackerError::InvalidInput(_))));
}

#[test]
fn test_rotations_enumerates_all_six_orientations() {
    let rots = geometry::rotations(1, 2, 3);
    assert_eq!(rots.len(), 6);
    for rot in rots {
        let mut dims = rot;
        dims.sort_unstable();
        assert_eq!(dims, [1, 2, 3]);
    }
}

#[test]
fn test_touching_faces_do_not_intersect() {
    let placed = Placement {
        item_id: "a".to_string(),
        x: 0,
        y: 0,
        z: 0,
        w: 10,
        h: 10,
        d: 10,
    };

    assert!(!geometry::intersects(&placed, 10, 0, 0, 10, 10, 10));
    assert!(!geometry::intersects(&placed, 0, 10, 0, 10, 10, 10));
    assert!(geometry::intersects(&placed, 9, 9, 9, 10, 10, 10));
}

#[test]
fn test_largest_items_are_placed_first() {
    // The big slab only fits while the box is empty; if small cubes went in
    // first it would be squeezed out.
    let items = vec![item("filler", 4, 4, 4, 8), item("slab", 10, 10, 6, 1)];
    let boxes = vec![box_type("box", 10, 10, 10)];

    let result = run(items, boxes);

    let slab_placed = result
        .packed_boxes
        .iter()
        .flat_map(|b| &b.contents)
        .any(|p| p.item_id == "slab");
    assert!(slab_placed);
}
