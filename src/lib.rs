//! backdrop - City background carousel
//!
//! Cross-fades between background photographs grouped by city. The first image
//! is loaded with priority behind a low-fidelity placeholder, the rest are
//! preloaded once in the background, and a timer rotates through whatever has
//! finished loading.

pub mod animation;
pub mod config;
pub mod constants;
pub mod error;
pub mod host;
pub mod message;
pub mod model;
pub mod runtime;
pub mod selector;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::{CarouselConfig, LogLevel};
pub use error::{ConfigError, StartupError};
pub use host::Host;
pub use message::Message;
pub use model::{ImageKey, SizeClass, SlotKey};
pub use runtime::{HeadlessHost, HeadlessRuntime};
pub use session::CarouselSession;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
