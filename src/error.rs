//! Error types for configuration and startup.

use std::path::PathBuf;
use thiserror::Error;

use backdrop_platform::PlatformError;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error while reading or writing a config file
    #[error("IO error reading {path:?}: {source}")]
    Io {
        /// File that was accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config was written by a newer, incompatible version
    #[error("Unsupported config version {found} (expected at most {supported})")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version this build understands
        supported: u32,
    },

    /// The city list is empty
    #[error("At least one city must be configured")]
    NoCities,

    /// The same city appears more than once
    #[error("City '{city}' is listed more than once")]
    DuplicateCity {
        /// The repeated city
        city: String,
    },

    /// The default city is not in the city list
    #[error("Default city '{city}' is not one of the configured cities")]
    UnknownDefaultCity {
        /// The configured default
        city: String,
    },

    /// Cities need at least one image each
    #[error("images_per_city must be at least 1")]
    NoImages,

    /// A timing value is out of range
    #[error("Invalid timing: {message}")]
    InvalidTiming {
        /// What is wrong
        message: String,
    },
}

/// Errors that can stop the carousel from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Platform problem (missing page element, JS failure)
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::UnknownDefaultCity {
                city: "oslo".to_string()
            }
            .to_string(),
            "Default city 'oslo' is not one of the configured cities"
        );
        assert_eq!(
            ConfigError::NoImages.to_string(),
            "images_per_city must be at least 1"
        );
    }

    #[test]
    fn test_startup_error_wraps_platform() {
        let err: StartupError = PlatformError::missing("cities").into();
        assert_eq!(err.to_string(), "Element not found: #cities");
    }
}
