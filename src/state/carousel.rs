//! The active-slot pointer and rotation state.

use backdrop_platform::{DisplayHandle, TimerId};

/// Whether the rotation timer is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No tick timer (before start, during a city-change pause, after shutdown)
    Idle,
    /// Tick timer armed
    Running(TimerId),
}

/// Which slot is on screen and what the rotation is doing.
///
/// `active_index == 0` means no real image has been shown yet and the next tick
/// targets index 1. After a city change that could not swap right away,
/// `active_handle` may still belong to the previous city while `active_index`
/// keeps its position, so the rotation continues from there in the new city.
#[derive(Debug, Clone)]
pub struct CarouselState {
    pub active_city: String,
    pub active_index: u32,
    /// Element currently on screen
    pub active_handle: Option<DisplayHandle>,
    pub driver: DriverState,
    /// Pending settle timer of the last city change
    pub settle_timer: Option<TimerId>,
    /// City most recently picked by the user
    pub selected_city: Option<String>,
    /// Set once the first city change settled
    pub city_changed: bool,
}

impl CarouselState {
    pub fn new(city: &str) -> Self {
        Self {
            active_city: city.to_string(),
            active_index: 0,
            active_handle: None,
            driver: DriverState::Idle,
            settle_timer: None,
            selected_city: None,
            city_changed: false,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.driver, DriverState::Running(_))
    }

    /// Point at a new slot. The only way the visible slot changes.
    pub fn set_active(&mut self, city: &str, index: u32, handle: DisplayHandle) {
        self.active_city = city.to_string();
        self.active_index = index;
        self.active_handle = Some(handle);
    }

    /// Switch the rotation to `city` before any of its images is shown. The
    /// visible element and the rotation position stay until the next swap.
    pub fn follow_city(&mut self, city: &str) {
        self.active_city = city.to_string();
    }
}

/// Index that follows `current` in a rotation of `images_per_city`, 1-based
/// with wrap-around.
pub fn next_index(current: u32, images_per_city: u32) -> u32 {
    if current < images_per_city {
        current + 1
    } else {
        1
    }
}
