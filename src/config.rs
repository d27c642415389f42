//! Configuration file support for the carousel.
//!
//! A session is described by a JSON document: which cities exist, how many
//! images each has, where the images live and how the rotation is timed.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{self, page};
use crate::error::ConfigError;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Element ids and classes of the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageIds {
    /// Container holding the background elements
    #[serde(default = "default_container_id")]
    pub container_id: String,

    /// Low-fidelity placeholder shipped with the page
    #[serde(default = "default_placeholder_id")]
    pub placeholder_id: String,

    /// City selector control
    #[serde(default = "default_selector_id")]
    pub selector_id: String,

    /// Body class that unhides the content
    #[serde(default = "default_loaded_class")]
    pub loaded_class: String,
}

fn default_container_id() -> String {
    page::CONTAINER_ID.to_string()
}

fn default_placeholder_id() -> String {
    page::PLACEHOLDER_ID.to_string()
}

fn default_selector_id() -> String {
    page::SELECTOR_ID.to_string()
}

fn default_loaded_class() -> String {
    page::LOADED_CLASS.to_string()
}

impl Default for PageIds {
    fn default() -> Self {
        Self {
            container_id: default_container_id(),
            placeholder_id: default_placeholder_id(),
            selector_id: default_selector_id(),
            loaded_class: default_loaded_class(),
        }
    }
}

/// Rotation timings in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    #[serde(default = "default_fade_step_ms")]
    pub fade_step_ms: u64,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_tick_ms() -> u64 {
    constants::TICK_PERIOD.as_millis() as u64
}

fn default_fade_ms() -> u64 {
    constants::FADE_DURATION.as_millis() as u64
}

fn default_fade_step_ms() -> u64 {
    constants::FADE_STEP.as_millis() as u64
}

fn default_settle_ms() -> u64 {
    constants::SETTLE_DELAY.as_millis() as u64
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            fade_ms: default_fade_ms(),
            fade_step_ms: default_fade_step_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl Timings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn fade_step(&self) -> Duration {
        Duration::from_millis(self.fade_step_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Carousel configuration that can be exported and imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Cities in selector order
    pub cities: Vec<String>,

    /// City shown first; the first city when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,

    /// Images per city, numbered from 1
    #[serde(default = "default_images_per_city")]
    pub images_per_city: u32,

    /// Url prefix of the image files
    #[serde(default = "default_image_root")]
    pub image_root: String,

    /// Image file extension
    #[serde(default = "default_image_extension")]
    pub image_extension: String,

    /// Host page element ids
    #[serde(default)]
    pub page: PageIds,

    /// Rotation timings
    #[serde(default)]
    pub timings: Timings,

    /// Give up on an image after this many milliseconds; wait forever if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_timeout_ms: Option<u64>,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_images_per_city() -> u32 {
    constants::DEFAULT_IMAGES_PER_CITY
}

fn default_image_root() -> String {
    "/images".to_string()
}

fn default_image_extension() -> String {
    constants::DEFAULT_IMAGE_EXTENSION.to_string()
}

impl CarouselConfig {
    /// Configuration with defaults for everything but the cities.
    pub fn for_cities(cities: &[&str], images_per_city: u32) -> Self {
        Self {
            version: CONFIG_VERSION,
            cities: cities.iter().map(|c| c.to_string()).collect(),
            default_city: None,
            images_per_city,
            image_root: default_image_root(),
            image_extension: default_image_extension(),
            page: PageIds::default(),
            timings: Timings::default(),
            load_timeout_ms: None,
            log_level: LogLevel::default(),
        }
    }

    /// The configured default city, or the first city.
    pub fn default_city(&self) -> &str {
        self.default_city
            .as_deref()
            .or_else(|| self.cities.first().map(String::as_str))
            .unwrap_or_default()
    }

    /// Load timeout, if configured.
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }

    /// Check the invariants the carousel relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: CONFIG_VERSION,
            });
        }
        if self.cities.is_empty() {
            return Err(ConfigError::NoCities);
        }
        for (i, city) in self.cities.iter().enumerate() {
            if self.cities[..i].contains(city) {
                return Err(ConfigError::DuplicateCity { city: city.clone() });
            }
        }
        if let Some(city) = &self.default_city {
            if !self.cities.contains(city) {
                return Err(ConfigError::UnknownDefaultCity { city: city.clone() });
            }
        }
        if self.images_per_city == 0 {
            return Err(ConfigError::NoImages);
        }
        if self.timings.fade_step_ms == 0 {
            return Err(ConfigError::InvalidTiming {
                message: "fade_step_ms must be positive".to_string(),
            });
        }
        if self.timings.tick_ms == 0 {
            return Err(ConfigError::InvalidTiming {
                message: "tick_ms must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {:?} ({} cities)", path, config.cities.len());
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = CarouselConfig::from_json(r#"{ "cities": ["sf", "nyc"] }"#).unwrap();

        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.default_city(), "sf");
        assert_eq!(config.images_per_city, 4);
        assert_eq!(config.image_extension, "jpg");
        assert_eq!(config.page.placeholder_id, "sf-1-from-data");
        assert_eq!(config.timings, Timings::default());
        assert_eq!(config.timings.tick(), Duration::from_millis(5_000));
        assert_eq!(config.load_timeout(), None);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = CarouselConfig::for_cities(&["la", "sf"], 2);
        config.default_city = Some("sf".to_string());
        config.load_timeout_ms = Some(30_000);
        config.log_level = LogLevel::Debug;

        let parsed = CarouselConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed.cities, config.cities);
        assert_eq!(parsed.default_city(), "sf");
        assert_eq!(parsed.load_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(parsed.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            CarouselConfig::from_json(r#"{ "cities": [] }"#),
            Err(ConfigError::NoCities)
        ));
        assert!(matches!(
            CarouselConfig::from_json(r#"{ "cities": ["sf", "sf"] }"#),
            Err(ConfigError::DuplicateCity { .. })
        ));
        assert!(matches!(
            CarouselConfig::from_json(r#"{ "cities": ["sf"], "default_city": "la" }"#),
            Err(ConfigError::UnknownDefaultCity { .. })
        ));
        assert!(matches!(
            CarouselConfig::from_json(r#"{ "cities": ["sf"], "images_per_city": 0 }"#),
            Err(ConfigError::NoImages)
        ));
        assert!(matches!(
            CarouselConfig::from_json(r#"{ "cities": ["sf"], "timings": { "fade_step_ms": 0 } }"#),
            Err(ConfigError::InvalidTiming { .. })
        ));
        assert!(matches!(
            CarouselConfig::from_json(r#"{ "version": 99, "cities": ["sf"] }"#),
            Err(ConfigError::UnsupportedVersion { found: 99, .. })
        ));
        assert!(matches!(
            CarouselConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CarouselConfig::load(Path::new("/nonexistent/backdrop.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
    }
}
