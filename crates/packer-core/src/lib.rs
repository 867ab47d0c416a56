pub mod packer;
pub mod types;

pub use packer::Packer;
pub use types::{
    BoxType, Item, PackRequest, PackResult, PackedBox, PackerError, Placement, Result, Summary,
};
