use crate::types::*;
use std::collections::HashMap;

mod frontier;
mod geometry;
mod summary;
#[cfg(test)]
mod tests;

use frontier::{Anchor, Frontier};
use geometry::{fits_in_box, intersects, rotations};

// Placement score weights: strict low-y, then low-z, then low-x preference
// (bottom-left-back), with the span leftovers as a tightest-fit tie-break.
const WEIGHT_Y: u64 = 1000;
const WEIGHT_Z: u64 = 100;
const WEIGHT_X: u64 = 10;

/// One quantity unit of an input item.
#[derive(Debug, Clone)]
struct UnitItem {
    id: String,
    w: u32,
    h: u32,
    d: u32,
    volume: u64,
    max_dim: u32,
}

/// Result of trial-packing a unit-item list into one box instance.
struct BoxFill {
    placements: Vec<Placement>,
    /// Mirrors the input item order
    packed: Vec<bool>,
    packed_volume: u64,
}

/// Packs cuboid items into boxes using an extreme-point heuristic.
pub struct Packer {
    request: PackRequest,
}

impl Packer {
    /// Validates the request and builds a new packer instance.
    pub fn new(request: PackRequest) -> Result<Self> {
        for item in &request.items {
            if item.w == 0 || item.h == 0 || item.d == 0 {
                return Err(PackerError::InvalidInput(format!(
                    "Item '{}' has a zero dimension",
                    item.id
                )));
            }
        }

        for box_type in &request.boxes {
            if box_type.w == 0 || box_type.h == 0 || box_type.d == 0 {
                return Err(PackerError::InvalidInput(format!(
                    "Box '{}' has a zero dimension",
                    box_type.id
                )));
            }
        }

        Ok(Self { request })
    }

    /// Distributes all items into boxes. Each round trial-packs the remaining
    /// items into every box type and commits the type that packed the most
    /// volume, until nothing more can be placed.
    pub fn pack(&self) -> Result<PackResult> {
        let mut remaining = self.expand_items();
        remaining.sort_by(|a, b| {
            b.volume
                .cmp(&a.volume)
                .then(b.max_dim.cmp(&a.max_dim))
        });

        // Ascending by volume, so a packed-volume tie resolves to the
        // smaller (better utilized) box.
        let mut boxes = self.request.boxes.clone();
        boxes.sort_by_key(BoxType::volume);

        let mut packed_boxes = Vec::new();
        while !remaining.is_empty() {
            let Some((box_idx, fill)) = self.find_best_box(&remaining, &boxes) else {
                break;
            };

            packed_boxes.push(PackedBox {
                box_id: boxes[box_idx].id.clone(),
                contents: fill.placements,
            });

            remaining = filter_unpacked(remaining, &fill.packed);
        }

        let unpacked_items = aggregate_unpacked(&self.request.items, &remaining);
        let summary = self.calculate_summary(&packed_boxes);

        Ok(PackResult {
            packed_boxes,
            unpacked_items,
            summary,
        })
    }

    /// Duplicates items according to their requested quantity.
    fn expand_items(&self) -> Vec<UnitItem> {
        let mut expanded = Vec::new();
        for item in &self.request.items {
            for _ in 0..item.quantity {
                expanded.push(UnitItem {
                    id: item.id.clone(),
                    w: item.w,
                    h: item.h,
                    d: item.d,
                    volume: item.volume(),
                    max_dim: item.w.max(item.h).max(item.d),
                });
            }
        }
        expanded
    }

    /// Trial-packs the remaining items into every box type and returns the
    /// index of the winner plus its fill, or None if no type places anything.
    fn find_best_box(&self, items: &[UnitItem], boxes: &[BoxType]) -> Option<(usize, BoxFill)> {
        let mut best: Option<(usize, BoxFill)> = None;

        for (idx, box_type) in boxes.iter().enumerate() {
            let fill = self.pack_into_box(items, box_type);
            if fill.packed_volume == 0 {
                continue;
            }

            let better = match &best {
                None => true,
                Some((best_idx, best_fill)) => {
                    fill.packed_volume > best_fill.packed_volume
                        || (fill.packed_volume == best_fill.packed_volume
                            && box_type.volume() < boxes[*best_idx].volume())
                }
            };
            if better {
                best = Some((idx, fill));
            }
        }

        best
    }

    /// Packs as many items as possible into one instance of `box_type` using
    /// the extreme-point heuristic. Pure with respect to `items`; an earlier
    /// unplaceable item never blocks later, smaller ones.
    fn pack_into_box(&self, items: &[UnitItem], box_type: &BoxType) -> BoxFill {
        let mut frontier = Frontier::new(box_type);
        let mut placements: Vec<Placement> = Vec::new();
        let mut packed = vec![false; items.len()];
        let mut packed_volume = 0u64;

        for (i, item) in items.iter().enumerate() {
            frontier.sort_for_placement();

            let Some((anchor, rot)) =
                find_best_placement(frontier.anchors(), item, box_type, &placements)
            else {
                continue;
            };

            let placement = Placement {
                item_id: item.id.clone(),
                x: anchor.x,
                y: anchor.y,
                z: anchor.z,
                w: rot[0],
                h: rot[1],
                d: rot[2],
            };
            placements.push(placement.clone());
            packed[i] = true;
            packed_volume += item.volume;

            frontier.regenerate(&placement, box_type, &placements);
        }

        BoxFill {
            placements,
            packed,
            packed_volume,
        }
    }
}

/// Finds the (anchor, rotation) pair minimizing the placement score, or None
/// when no pair is feasible.
fn find_best_placement(
    anchors: &[Anchor],
    item: &UnitItem,
    box_type: &BoxType,
    placements: &[Placement],
) -> Option<(Anchor, [u32; 3])> {
    let mut best: Option<(Anchor, [u32; 3], u64)> = None;

    for anchor in anchors {
        for rot in rotations(item.w, item.h, item.d) {
            let [w, h, d] = rot;

            if !fits_in_box(box_type, anchor.x, anchor.y, anchor.z, w, h, d) {
                continue;
            }
            if placements
                .iter()
                .any(|p| intersects(p, anchor.x, anchor.y, anchor.z, w, h, d))
            {
                continue;
            }

            // Free spans are distances to the box boundary, so once the fit
            // check passed the leftovers cannot underflow.
            let score = anchor.y as u64 * WEIGHT_Y
                + anchor.z as u64 * WEIGHT_Z
                + anchor.x as u64 * WEIGHT_X
                + (anchor.free_w - w) as u64
                + (anchor.free_h - h) as u64
                + (anchor.free_d - d) as u64;

            match best {
                None => best = Some((*anchor, rot, score)),
                Some((_, _, best_score)) if score < best_score => {
                    best = Some((*anchor, rot, score));
                }
                _ => {}
            }
        }
    }

    best.map(|(anchor, rot, _)| (anchor, rot))
}

/// Keeps only the units the last committed box did not absorb.
fn filter_unpacked(items: Vec<UnitItem>, packed: &[bool]) -> Vec<UnitItem> {
    items
        .into_iter()
        .zip(packed)
        .filter(|(_, &is_packed)| !is_packed)
        .map(|(item, _)| item)
        .collect()
}

/// Re-aggregates leftover units by original item id, preserving request order.
fn aggregate_unpacked(request_items: &[Item], remaining: &[UnitItem]) -> Vec<Item> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for unit in remaining {
        *counts.entry(unit.id.as_str()).or_insert(0) += 1;
    }

    request_items
        .iter()
        .filter_map(|item| {
            counts.remove(item.id.as_str()).map(|quantity| Item {
                quantity,
                ..item.clone()
            })
        })
        .collect()
}
