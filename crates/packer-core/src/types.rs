use serde::{Deserialize, Serialize};

/// Item to be packed. `quantity` copies of the same cuboid share one id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub w: u32,
    pub h: u32,
    pub d: u32,
    pub quantity: u32,
}

impl Item {
    pub fn volume(&self) -> u64 {
        self.w as u64 * self.h as u64 * self.d as u64
    }
}

/// Box type - describes an available container size/type.
/// A single type may be committed any number of times in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxType {
    pub id: String,
    pub w: u32,
    pub h: u32,
    pub d: u32,
}

impl BoxType {
    pub fn volume(&self) -> u64 {
        self.w as u64 * self.h as u64 * self.d as u64
    }
}

/// Input: What user provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackRequest {
    pub items: Vec<Item>,
    pub boxes: Vec<BoxType>,
}

/// Placement of an item inside a box. Position is the minimum corner;
/// (w, h, d) are the effective dimensions after the chosen rotation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: String,
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub w: u32,
    pub h: u32,
    pub d: u32,
}

impl Placement {
    pub fn volume(&self) -> u64 {
        self.w as u64 * self.h as u64 * self.d as u64
    }
}

/// One committed box instance with its packed contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackedBox {
    pub box_id: String,
    pub contents: Vec<Placement>,
}

/// Summary statistics over all committed boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_box_volume: u64,
    pub total_item_volume: u64,
    pub utilization_percent: f64,
}

/// Output: What the packer returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackResult {
    /// Committed box instances, in commit order
    pub packed_boxes: Vec<PackedBox>,
    /// Items that fit nowhere, re-aggregated by original item id
    pub unpacked_items: Vec<Item>,
    /// Overall statistics
    pub summary: Summary,
}

/// Error type for packing
#[derive(Debug, thiserror::Error)]
pub enum PackerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PackerError>;
