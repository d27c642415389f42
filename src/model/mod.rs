//! Data model: slots, image keys, size classes and the image catalog.

mod catalog;
mod size_class;
mod slot;

pub use catalog::ImageCatalog;
pub use size_class::SizeClass;
pub use slot::{ImageKey, SlotKey};
