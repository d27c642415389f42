//! Slot and image identifiers.

use std::fmt;

use super::SizeClass;

/// One image position in the rotation: a city and a 1-based index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    /// City the image belongs to
    pub city: String,
    /// 1-based position within the city
    pub index: u32,
}

impl SlotKey {
    pub fn new(city: impl Into<String>, index: u32) -> Self {
        Self {
            city: city.into(),
            index,
        }
    }

    /// Id of the display element showing this slot.
    pub fn element_id(&self) -> String {
        format!("{}-{}", self.city, self.index)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.city, self.index)
    }
}

/// Exactly one loadable image resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey {
    slot: SlotKey,
    size: SizeClass,
}

impl ImageKey {
    pub fn new(slot: SlotKey, size: SizeClass) -> Self {
        Self { slot, size }
    }

    pub fn slot(&self) -> &SlotKey {
        &self.slot
    }

    pub fn size(&self) -> SizeClass {
        self.size
    }

    /// File name following `<city>-<index>-<size>.<ext>`.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "{}-{}-{}.{}",
            self.slot.city, self.slot.index, self.size, extension
        )
    }

    /// Full resource url under `root`.
    pub fn url(&self, root: &str, extension: &str) -> String {
        let file = self.file_name(extension);
        if root.is_empty() {
            file
        } else {
            format!("{}/{}", root.trim_end_matches('/'), file)
        }
    }
}
