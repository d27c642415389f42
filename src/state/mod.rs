//! Session state: slot cache, run-once guards and the carousel pointer.

mod carousel;
mod lifecycle;
mod slot_cache;

pub use carousel::{CarouselState, DriverState, next_index};
pub use lifecycle::Lifecycle;
pub use slot_cache::SlotCache;
