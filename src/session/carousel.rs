//! Rotation timer, cross-fades and city changes.

use backdrop_platform::DisplayHandle;

use super::CarouselSession;
use crate::constants::{tags, z_order};
use crate::host::Host;
use crate::message::Message;
use crate::state::{DriverState, next_index};

impl CarouselSession {
    /// Arm the repeating rotation tick (Idle → Running).
    pub(super) fn start_rotation(&mut self, host: &mut dyn Host) {
        if self.carousel.is_running() {
            return;
        }
        let timer = host
            .scheduler()
            .schedule_repeating(self.timings.tick(), Message::Tick);
        self.carousel.driver = DriverState::Running(timer);
        log::debug!("▶️ Rotation running for {}", self.carousel.active_city);
    }

    /// Disarm the rotation tick (Running → Idle).
    pub(super) fn stop_rotation(&mut self, host: &mut dyn Host) {
        if let DriverState::Running(timer) = self.carousel.driver {
            host.scheduler().cancel(timer);
            self.carousel.driver = DriverState::Idle;
            log::debug!("⏸️ Rotation paused");
        }
    }

    pub(super) fn on_tick(&mut self, host: &mut dyn Host) {
        let city = self.carousel.active_city.clone();
        if !self.cache.has_city(&city) {
            log::debug!("Tick skipped: nothing of {} loaded yet", city);
            return;
        }
        let next = next_index(self.carousel.active_index, self.catalog.images_per_city());
        match self.cache.get(&city, next).cloned() {
            Some(handle) => self.swap(handle, &city, next, host),
            None => log::debug!("Tick skipped: {}-{} not loaded yet", city, next),
        }
    }

    /// Cross-fade from the active element to `handle` and make it the active
    /// slot. The pointer moves immediately; the fades finish on their own.
    pub fn swap(&mut self, handle: DisplayHandle, city: &str, index: u32, host: &mut dyn Host) {
        let outgoing = self.carousel.active_handle.clone();
        if outgoing.as_ref() == Some(&handle) {
            self.carousel.set_active(city, index, handle);
            return;
        }

        let z_index = outgoing
            .as_ref()
            .map_or(z_order::ACTIVE, |active| host.stage().z_index(active));
        let stage = host.stage();
        stage.set_z_index(&handle, z_index);
        stage.remove_state_tag(&handle, tags::OFFSCREEN);

        let duration = self.timings.fade();
        self.animator.fade(&handle, 0.0, 1.0, duration, host);
        if let Some(active) = &outgoing {
            self.animator.fade(active, 1.0, 0.0, duration, host);
        }

        log::info!("🔀 {}-{} -> {}", city, index, handle);
        self.carousel.set_active(city, index, handle);
    }

    pub(super) fn on_city_selected(&mut self, city: &str, host: &mut dyn Host) {
        if !self.catalog.contains_city(city) {
            log::warn!("Ignoring selection of unknown city '{}'", city);
            return;
        }
        log::info!("🏙️ City changed to {}", city);

        self.stop_rotation(host);
        if let Some(timer) = self.carousel.settle_timer.take() {
            host.scheduler().cancel(timer);
        }
        self.carousel.selected_city = Some(city.to_string());
        self.carousel.settle_timer = Some(
            host.scheduler()
                .schedule_once(self.timings.settle(), Message::Settled),
        );

        // Covers a change made before the first image finished.
        self.preload_all(host);
    }

    pub(super) fn on_settled(&mut self, host: &mut dyn Host) {
        self.carousel.settle_timer = None;
        let Some(city) = self.carousel.selected_city.clone() else {
            return;
        };

        if city != self.carousel.active_city {
            self.carousel.follow_city(&city);
        }
        if let Some(handle) = self.cache.get(&city, 1).cloned() {
            self.swap(handle, &city, 1, host);
        } else {
            log::debug!("{}-1 not loaded yet, waiting for the next tick", city);
        }

        self.carousel.city_changed = true;
        self.start_rotation(host);
    }
}
