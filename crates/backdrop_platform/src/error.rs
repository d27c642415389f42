//! Error types for platform operations.

use thiserror::Error;

/// Errors reported by platform implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// An element expected in the page was not found
    #[error("Element not found: #{id}")]
    MissingElement {
        /// Id that was looked up
        id: String,
    },

    /// The element exists but has the wrong kind
    #[error("Element #{id} is not a {expected}")]
    WrongElementKind {
        /// Id of the element
        id: String,
        /// Expected element kind
        expected: &'static str,
    },

    /// A scripted completion referred to a request that is not pending
    #[error("No pending image request for {tag}")]
    UnknownRequest {
        /// Debug rendering of the request tag
        tag: String,
    },

    /// A call into the JavaScript host failed
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl PlatformError {
    /// Build a `MissingElement` error for `id`.
    pub fn missing(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }
}
