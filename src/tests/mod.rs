//! Scenario tests driving whole sessions through the headless runtime.
//!
//! Unit tests for individual pieces live next to the code; these cover the
//! interplay of first paint, preloading, rotation and city changes.

mod first_paint_tests;
mod preload_tests;
mod timeout_tests;

use std::time::Duration;

use crate::config::CarouselConfig;
use crate::model::SlotKey;
use crate::runtime::HeadlessRuntime;

/// Runtime over `cities` with a 1280px viewport (1600px images).
fn runtime(cities: &[&str], images_per_city: u32) -> HeadlessRuntime {
    runtime_with(CarouselConfig::for_cities(cities, images_per_city))
}

fn runtime_with(config: CarouselConfig) -> HeadlessRuntime {
    HeadlessRuntime::new(&config, 1280).expect("valid test config")
}

/// Runtime with the first image of `sf` already on screen.
fn started(cities: &[&str], images_per_city: u32) -> HeadlessRuntime {
    let mut rt = runtime(cities, images_per_city);
    rt.start();
    rt.complete_load(&slot("sf", 1)).expect("first image pending");
    rt
}

fn slot(city: &str, index: u32) -> SlotKey {
    SlotKey::new(city, index)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn z_index(rt: &HeadlessRuntime, id: &str) -> i32 {
    rt.host().stage.element(id).map_or(0, |e| e.z_index)
}

fn opacity(rt: &HeadlessRuntime, id: &str) -> f64 {
    rt.host().stage.element(id).map_or(1.0, |e| e.opacity)
}

fn is_ready(rt: &HeadlessRuntime, city: &str, index: u32) -> bool {
    rt.session().cache().is_ready(city, index)
}
