//! Priority load of the first image.
//!
//! Image 1 of the default city is requested before anything else. If the
//! browser already holds it, it goes straight on screen. Otherwise the
//! low-fidelity placeholder shipped with the page stands in until the real
//! image arrives, and is then replaced without a fade.

use backdrop_platform::LoadStatus;

use super::CarouselSession;
use crate::constants::{tags, z_order};
use crate::host::Host;

impl CarouselSession {
    pub(super) fn begin_first_paint(&mut self, host: &mut dyn Host) {
        if !self.first_paint.begin() {
            return;
        }
        let slot = self.catalog.first_slot();
        match self.issue_load(&slot, host) {
            LoadStatus::Complete => {
                log::info!("⚡ First image {} served from cache", slot);
                self.complete_first_paint(host);
            }
            LoadStatus::Pending => {
                let stage = host.stage();
                let placeholder = stage.get_or_create_display_element(&self.placeholder_id);
                stage.set_z_index(&placeholder, z_order::ACTIVE);
                log::info!("Showing placeholder {} while {} loads", placeholder, slot);
                self.carousel.active_handle = Some(placeholder);
                self.placeholder_shown = true;
            }
        }
        self.reveal_page(host);
    }

    /// Runs at most once, however many completions arrive.
    pub(super) fn complete_first_paint(&mut self, host: &mut dyn Host) {
        if !self.first_paint.finish() {
            log::debug!("First image already handled");
            return;
        }
        let slot = self.catalog.first_slot();
        self.register_style(&slot, host);
        let element = self.acquire_slot_element(&slot, host);
        self.cache.record_ready(&slot.city, slot.index, element.clone());

        if self.carousel.city_changed {
            // The user moved on; keep the image for later but off screen.
            host.stage().add_state_tag(&element, tags::OFFSCREEN);
            log::info!("First image {} cached after a city change", slot);
        } else {
            if self.placeholder_shown {
                if let Some(placeholder) = self.carousel.active_handle.clone() {
                    host.stage().set_z_index(&placeholder, z_order::DEMOTED);
                }
            }
            host.stage().remove_state_tag(&element, tags::OFFSCREEN);
            self.carousel.set_active(&slot.city, slot.index, element);
            log::info!("✅ First image {} on screen", slot);
            self.preload_all(host);
        }
        self.reveal_page(host);
    }
}
