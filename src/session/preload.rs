//! One-time background load of every slot.

use backdrop_platform::LoadStatus;

use super::CarouselSession;
use crate::constants::tags;
use crate::host::Host;
use crate::model::SlotKey;

impl CarouselSession {
    /// Request every slot not yet on its way, city-major. Only the first call
    /// of a session does anything.
    pub fn preload_all(&mut self, host: &mut dyn Host) {
        if !self.preload.begin() {
            log::debug!("Preloading already started");
            return;
        }

        let first = self.catalog.first_slot();
        let slots: Vec<SlotKey> = self.catalog.slots().collect();
        let mut requested = 0;

        for slot in slots {
            // The fast path owns the first slot until it completes.
            if slot == first && !self.first_paint.is_done() {
                continue;
            }
            if self.cache.is_ready(&slot.city, slot.index) || self.loads.is_in_flight(&slot) {
                continue;
            }
            let element = self.acquire_slot_element(&slot, host);
            if self.carousel.active_handle.as_ref() == Some(&element) {
                continue;
            }

            host.stage().add_state_tag(&element, tags::OFFSCREEN);
            self.register_style(&slot, host);
            requested += 1;
            if self.issue_load(&slot, host) == LoadStatus::Complete {
                self.record_slot_ready(&slot, host);
            }
        }

        self.preload.finish();
        log::info!("🖼️ Preloading {} images in the background", requested);
    }
}
