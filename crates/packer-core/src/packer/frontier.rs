use crate::types::{BoxType, Placement};
use std::collections::HashSet;

/// A candidate corner for the next placement (extreme point). The free span
/// is the distance to the box boundary on each axis - a coarse upper bound,
/// not a certified empty region, so every candidate placement is still
/// validated against all existing placements at use time.
#[derive(Debug, Clone, Copy)]
pub(super) struct Anchor {
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub free_w: u32,
    pub free_h: u32,
    pub free_d: u32,
}

impl Anchor {
    fn corner(&self) -> (u32, u32, u32) {
        (self.x, self.y, self.z)
    }

    /// True when the corner lies strictly inside the placement's volume.
    fn inside(&self, p: &Placement) -> bool {
        self.x >= p.x
            && self.x < p.x + p.w
            && self.y >= p.y
            && self.y < p.y + p.h
            && self.z >= p.z
            && self.z < p.z + p.d
    }
}

/// The evolving anchor set for a single box fill. Owned by one packing
/// attempt and never shared across box-type trials.
pub(super) struct Frontier {
    anchors: Vec<Anchor>,
}

impl Frontier {
    /// Seeds an empty box with a single anchor at the origin spanning the
    /// whole box.
    pub(super) fn new(box_type: &BoxType) -> Self {
        Self {
            anchors: vec![Anchor {
                x: 0,
                y: 0,
                z: 0,
                free_w: box_type.w,
                free_h: box_type.h,
                free_d: box_type.d,
            }],
        }
    }

    pub(super) fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Orders anchors by ascending y, then z, then x, so low positions are
    /// filled first and score ties resolve towards the floor.
    pub(super) fn sort_for_placement(&mut self) {
        self.anchors
            .sort_by(|a, b| (a.y, a.z, a.x).cmp(&(b.y, b.z, b.x)));
    }

    /// Rebuilds the anchor set after committing `placed`: three candidates on
    /// the placed box's right/top/front faces, surviving old anchors, then a
    /// dedup by corner. `placements` must already include `placed`.
    pub(super) fn regenerate(
        &mut self,
        placed: &Placement,
        box_type: &BoxType,
        placements: &[Placement],
    ) {
        let candidates = [
            Anchor {
                x: placed.x + placed.w,
                y: placed.y,
                z: placed.z,
                free_w: box_type.w - (placed.x + placed.w),
                free_h: box_type.h - placed.y,
                free_d: box_type.d - placed.z,
            },
            Anchor {
                x: placed.x,
                y: placed.y + placed.h,
                z: placed.z,
                free_w: box_type.w - placed.x,
                free_h: box_type.h - (placed.y + placed.h),
                free_d: box_type.d - placed.z,
            },
            Anchor {
                x: placed.x,
                y: placed.y,
                z: placed.z + placed.d,
                free_w: box_type.w - placed.x,
                free_h: box_type.h - placed.y,
                free_d: box_type.d - (placed.z + placed.d),
            },
        ];

        let mut next: Vec<Anchor> = Vec::with_capacity(self.anchors.len() + candidates.len());

        for anchor in candidates {
            if anchor.x >= box_type.w || anchor.y >= box_type.h || anchor.z >= box_type.d {
                continue;
            }
            if placements.iter().any(|p| anchor.inside(p)) {
                continue;
            }
            next.push(anchor);
        }

        // Old anchors survive unless the new box swallowed their corner.
        for anchor in &self.anchors {
            if !anchor.inside(placed) {
                next.push(*anchor);
            }
        }

        let mut seen = HashSet::new();
        next.retain(|anchor| seen.insert(anchor.corner()));

        self.anchors = next;
    }
}
