use crate::types::{BoxType, Placement};

/// All six axis-aligned orientations of a cuboid. Equal dimensions yield
/// duplicate entries; the redundant checks are cheap and not filtered.
pub(super) fn rotations(w: u32, h: u32, d: u32) -> [[u32; 3]; 6] {
    [
        [w, h, d],
        [w, d, h],
        [h, w, d],
        [h, d, w],
        [d, w, h],
        [d, h, w],
    ]
}

/// True iff a box of size (w, h, d) at corner (x, y, z) lies entirely inside
/// the container.
pub(super) fn fits_in_box(
    box_type: &BoxType,
    x: u32,
    y: u32,
    z: u32,
    w: u32,
    h: u32,
    d: u32,
) -> bool {
    x as u64 + w as u64 <= box_type.w as u64
        && y as u64 + h as u64 <= box_type.h as u64
        && z as u64 + d as u64 <= box_type.d as u64
}

/// Two axis-aligned boxes intersect iff their extents overlap on all three
/// axes simultaneously. Touching faces do not count as intersection.
pub(super) fn intersects(p: &Placement, x: u32, y: u32, z: u32, w: u32, h: u32, d: u32) -> bool {
    overlaps(p.x, p.w, x, w) && overlaps(p.y, p.h, y, h) && overlaps(p.z, p.d, z, d)
}

fn overlaps(a: u32, a_len: u32, b: u32, b_len: u32) -> bool {
    (a as u64) < b as u64 + b_len as u64 && a as u64 + a_len as u64 > b as u64
}
