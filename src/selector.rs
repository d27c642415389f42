//! City selector input.
//!
//! Mirrors the page's `<select>`: it exposes the current value and fires a
//! `change` event carrying the new value whenever the user picks a different
//! city.

use backdrop_platform::{EventHub, ListenerId};

/// Name of the event fired when the selection changes.
pub const CHANGE_EVENT: &str = "change";

/// A select control listing the cities.
#[derive(Debug)]
pub struct CitySelector {
    options: Vec<String>,
    value: String,
    events: EventHub<String>,
}

impl CitySelector {
    pub fn new(options: Vec<String>, value: &str) -> Self {
        Self {
            options,
            value: value.to_string(),
            events: EventHub::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Bind a handler to the change event.
    pub fn on_change<F>(&mut self, handler: F) -> ListenerId
    where
        F: Fn(&String) + 'static,
    {
        self.events.on(CHANGE_EVENT, handler)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    /// Pick `city` as the user would. Fires `change` only when the value
    /// actually changes to one of the options.
    pub fn select(&mut self, city: &str) -> bool {
        if city == self.value || !self.options.iter().any(|o| o == city) {
            return false;
        }
        self.value = city.to_string();
        self.events.emit(CHANGE_EVENT, &self.value);
        true
    }
}
