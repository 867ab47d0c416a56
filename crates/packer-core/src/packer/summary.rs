use super::*;
use std::collections::HashMap;

impl Packer {
    /// Computes volume totals and the utilization percentage across all
    /// committed boxes.
    pub(super) fn calculate_summary(&self, packed_boxes: &[PackedBox]) -> Summary {
        let volume_by_id: HashMap<&str, u64> = self
            .request
            .boxes
            .iter()
            .map(|b| (b.id.as_str(), b.volume()))
            .collect();

        let total_box_volume: u64 = packed_boxes
            .iter()
            .map(|b| volume_by_id.get(b.box_id.as_str()).copied().unwrap_or(0))
            .sum();

        let total_item_volume: u64 = packed_boxes
            .iter()
            .flat_map(|b| &b.contents)
            .map(|p| p.volume())
            .sum();

        let utilization_percent = if total_box_volume > 0 {
            (total_item_volume as f64 / total_box_volume as f64) * 100.0
        } else {
            0.0
        };

        Summary {
            total_box_volume,
            total_item_volume,
            utilization_percent,
        }
    }
}
