//! The fixed set of images a session may show.
//!
//! Every `ImageKey` of a session comes from here: the catalog is built once
//! from the configuration and the startup size class, and keys are never
//! created ad hoc afterwards.

use super::{ImageKey, SizeClass, SlotKey};
use crate::config::CarouselConfig;

/// Cities, image counts and naming scheme of one session.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    cities: Vec<String>,
    default_city: String,
    images_per_city: u32,
    size_class: SizeClass,
    image_root: String,
    extension: String,
}

impl ImageCatalog {
    /// Build the catalog for a validated configuration.
    pub fn new(config: &CarouselConfig, size_class: SizeClass) -> Self {
        Self {
            cities: config.cities.clone(),
            default_city: config.default_city().to_string(),
            images_per_city: config.images_per_city,
            size_class,
            image_root: config.image_root.clone(),
            extension: config.image_extension.clone(),
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    pub fn images_per_city(&self) -> u32 {
        self.images_per_city
    }

    pub fn size_class(&self) -> SizeClass {
        self.size_class
    }

    /// Whether `city` is one of the configured cities.
    pub fn contains_city(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// The slot shown first: image 1 of the default city.
    pub fn first_slot(&self) -> SlotKey {
        SlotKey::new(self.default_city.clone(), 1)
    }

    /// Every slot, city-major and index-minor.
    pub fn slots(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.cities.iter().flat_map(move |city| {
            (1..=self.images_per_city).map(move |index| SlotKey::new(city.clone(), index))
        })
    }

    /// Image key of `slot` at the session size class.
    pub fn image_key(&self, slot: &SlotKey) -> ImageKey {
        ImageKey::new(slot.clone(), self.size_class)
    }

    /// Resource url of `slot`.
    pub fn url(&self, slot: &SlotKey) -> String {
        self.image_key(slot).url(&self.image_root, &self.extension)
    }

    /// Upper bound on cache entries.
    pub fn slot_count(&self) -> usize {
        self.cities.len() * self.images_per_city as usize
    }
}
