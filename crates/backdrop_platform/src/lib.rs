//! backdrop_platform - Platform capabilities for the backdrop carousel
//!
//! This crate provides the small set of platform services the carousel core
//! depends on: display elements with style tags, cancellable timers, tagged
//! image requests and event listeners. Every capability is a trait with a
//! headless implementation (used natively and in tests) and, on wasm32, a DOM
//! implementation.

mod callback;
mod error;
mod event;
mod loader;
mod mailbox;
mod registry;
mod schedule;
mod stage;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use callback::Listener;
pub use error::PlatformError;
pub use event::{EventHub, ListenerId};
pub use loader::{ImageLoader, LoadEvent, LoadStatus, ScriptedLoader};
pub use mailbox::Mailbox;
pub use registry::Registry;
pub use schedule::{Scheduler, TimerId, VirtualScheduler};
pub use stage::{DisplayHandle, ElementState, MemoryStage, Stage};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::event::{EventHub, ListenerId};
    pub use crate::loader::{ImageLoader, LoadEvent, LoadStatus};
    pub use crate::mailbox::Mailbox;
    pub use crate::schedule::{Scheduler, TimerId};
    pub use crate::stage::{DisplayHandle, Stage};
}
