//! Global constants for the backdrop carousel

use std::time::Duration;

/// Period of the automatic rotation timer
pub const TICK_PERIOD: Duration = Duration::from_millis(5_000);

/// Length of one cross-fade
pub const FADE_DURATION: Duration = Duration::from_millis(1_000);

/// Interval between two opacity updates of a fade
pub const FADE_STEP: Duration = Duration::from_millis(20);

/// Pause between a city change and the first image of the new city
pub const SETTLE_DELAY: Duration = Duration::from_millis(2_500);

/// Default number of images per city
pub const DEFAULT_IMAGES_PER_CITY: u32 = 4;

/// Default image file extension
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Default element ids of the host page
pub mod page {
    /// Container holding the background elements
    pub const CONTAINER_ID: &str = "background";
    /// Low-fidelity placeholder embedded in the initial payload
    pub const PLACEHOLDER_ID: &str = "sf-1-from-data";
    /// City `<select>` control
    pub const SELECTOR_ID: &str = "cities";
    /// Class put on `<body>` once content may be shown
    pub const LOADED_CLASS: &str = "loaded";
}

/// State tags toggled on display elements
pub mod tags {
    /// Every slot element carries this tag
    pub const BACKGROUND_IMAGE: &str = "background-image";
    /// Hidden while preloading
    pub const OFFSCREEN: &str = "offscreen";
}

/// Stacking priorities
pub mod z_order {
    /// Active slots and freshly created slot elements
    pub const ACTIVE: i32 = 2;
    /// The placeholder after the real first image replaced it
    pub const DEMOTED: i32 = 1;
}
