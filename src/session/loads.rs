//! Image request bookkeeping.
//!
//! Every request goes through `issue_load`, which remembers when it was sent
//! and arms the optional timeout. Completions and timeouts come back here
//! before the slot is handed to the first-paint or preload logic.

use std::collections::{HashMap, HashSet};

use backdrop_platform::{LoadEvent, LoadStatus, TimerId};
use web_time::Instant;

use super::CarouselSession;
use crate::host::Host;
use crate::message::Message;
use crate::model::SlotKey;

struct InFlight {
    issued_at: Instant,
    deadline: Option<TimerId>,
}

/// Requests still waiting for a completion, and the ones given up on.
#[derive(Default)]
pub(super) struct LoadTracker {
    in_flight: HashMap<SlotKey, InFlight>,
    abandoned: HashSet<SlotKey>,
}

impl LoadTracker {
    pub(super) fn is_abandoned(&self, slot: &SlotKey) -> bool {
        self.abandoned.contains(slot)
    }

    pub(super) fn is_in_flight(&self, slot: &SlotKey) -> bool {
        self.in_flight.contains_key(slot)
    }
}

impl CarouselSession {
    /// Request the image of `slot`. A `Complete` status means the image is
    /// usable right now and no completion message will follow.
    pub(super) fn issue_load(&mut self, slot: &SlotKey, host: &mut dyn Host) -> LoadStatus {
        let url = self.catalog.url(slot);
        let status = host.loader().load(&url, slot.clone());
        match status {
            LoadStatus::Complete => {
                log::debug!("🖼️ {} already available", url);
            }
            LoadStatus::Pending => {
                log::debug!("🖼️ Requested {}", url);
                let deadline = self.load_timeout.map(|timeout| {
                    host.scheduler()
                        .schedule_once(timeout, Message::LoadTimedOut(slot.clone()))
                });
                self.loads.in_flight.insert(
                    slot.clone(),
                    InFlight {
                        issued_at: Instant::now(),
                        deadline,
                    },
                );
            }
        }
        status
    }

    pub(super) fn on_load_event(&mut self, event: LoadEvent<SlotKey>, host: &mut dyn Host) {
        let slot = event.tag().clone();
        if self.loads.is_abandoned(&slot) {
            log::debug!("Ignoring late completion for abandoned {}", slot);
            return;
        }
        if let Some(request) = self.loads.in_flight.remove(&slot) {
            if let Some(timer) = request.deadline {
                host.scheduler().cancel(timer);
            }
            log::debug!("Request for {} settled after {:?}", slot, request.issued_at.elapsed());
        }

        match event {
            LoadEvent::Loaded(slot) => {
                if slot == self.catalog.first_slot() && !self.first_paint.is_done() {
                    self.complete_first_paint(host);
                } else {
                    self.record_slot_ready(&slot, host);
                }
            }
            LoadEvent::Failed { tag, reason } => {
                log::warn!("Image {} failed to load: {}", tag, reason);
            }
        }
    }

    pub(super) fn on_load_timeout(&mut self, slot: &SlotKey, host: &mut dyn Host) {
        if self.loads.in_flight.remove(slot).is_none() {
            return;
        }
        self.loads.abandoned.insert(slot.clone());
        host.loader().cancel(slot);
        log::warn!("Gave up on image {} after {:?}", slot, self.load_timeout.unwrap_or_default());
    }

    /// Put a preloaded slot into the cache.
    pub(super) fn record_slot_ready(&mut self, slot: &SlotKey, host: &mut dyn Host) {
        let handle = self.acquire_slot_element(slot, host);
        if self.cache.record_ready(&slot.city, slot.index, handle) {
            log::debug!(
                "✅ {} ready ({}/{})",
                slot,
                self.cache.len(),
                self.catalog.slot_count()
            );
        }
    }

    pub(super) fn cancel_outstanding_loads(&mut self, host: &mut dyn Host) {
        for (slot, request) in self.loads.in_flight.drain() {
            if let Some(timer) = request.deadline {
                host.scheduler().cancel(timer);
            }
            host.loader().cancel(&slot);
        }
    }
}
