//! Headless event loop.
//!
//! `HeadlessRuntime` runs a session against the in-memory platform in
//! virtual time: timers fire only when `advance` is called and image requests
//! complete only when told to. The native demo and the scenario tests both
//! drive the carousel through it.

use std::time::Duration;

use backdrop_platform::{
    ImageLoader, LoadEvent, Mailbox, MemoryStage, PlatformError, Scheduler, ScriptedLoader, Stage,
    VirtualScheduler,
};

use crate::config::CarouselConfig;
use crate::error::ConfigError;
use crate::host::Host;
use crate::message::Message;
use crate::model::SlotKey;
use crate::selector::CitySelector;
use crate::session::CarouselSession;

/// In-memory platform: recording stage, virtual clock, scripted loader.
pub struct HeadlessHost {
    pub stage: MemoryStage,
    pub scheduler: VirtualScheduler<Message>,
    pub loader: ScriptedLoader<SlotKey>,
    /// Completions posted by `loader`
    pub load_events: Mailbox<LoadEvent<SlotKey>>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::with_stage(MemoryStage::new())
    }

    pub fn with_stage(stage: MemoryStage) -> Self {
        let load_events = Mailbox::new();
        Self {
            stage,
            scheduler: VirtualScheduler::new(),
            loader: ScriptedLoader::new(load_events.clone()),
            load_events,
        }
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for HeadlessHost {
    fn stage(&mut self) -> &mut dyn Stage {
        &mut self.stage
    }

    fn scheduler(&mut self) -> &mut dyn Scheduler<Message> {
        &mut self.scheduler
    }

    fn loader(&mut self) -> &mut dyn ImageLoader<SlotKey> {
        &mut self.loader
    }
}

/// A session wired to a headless host and a city selector.
pub struct HeadlessRuntime {
    session: CarouselSession,
    host: HeadlessHost,
    selector: CitySelector,
    inbox: Mailbox<Message>,
}

impl HeadlessRuntime {
    /// Build a runtime whose page contains the placeholder element.
    pub fn new(config: &CarouselConfig, viewport_width: u32) -> Result<Self, ConfigError> {
        let session = CarouselSession::new(config, viewport_width)?;
        let stage = MemoryStage::new().with_page_element(&config.page.placeholder_id);
        let host = HeadlessHost::with_stage(stage);

        let inbox = Mailbox::new();
        let mut selector = CitySelector::new(config.cities.clone(), config.default_city());
        let sink = inbox.clone();
        selector.on_change(move |city| sink.post(Message::CitySelected(city.clone())));

        Ok(Self {
            session,
            host,
            selector,
            inbox,
        })
    }

    /// Mark the image of `slot` as already held by the platform. Only
    /// meaningful before the slot is requested.
    pub fn precache(&mut self, slot: &SlotKey) {
        let url = self.session.catalog().url(slot);
        self.host.loader.precache(url);
    }

    pub fn start(&mut self) {
        self.session.start(&mut self.host);
        self.pump();
    }

    /// Pick a city in the selector. Returns false if nothing changed.
    pub fn select_city(&mut self, city: &str) -> bool {
        let changed = self.selector.select(city);
        self.pump();
        changed
    }

    /// Finish the pending request for `slot`.
    pub fn complete_load(&mut self, slot: &SlotKey) -> Result<(), PlatformError> {
        self.host.loader.complete(slot)?;
        self.pump();
        Ok(())
    }

    /// Finish the oldest pending request.
    pub fn complete_next_load(&mut self) -> Option<SlotKey> {
        let slot = self.host.loader.complete_next();
        self.pump();
        slot
    }

    /// Fail the pending request for `slot`.
    pub fn fail_load(&mut self, slot: &SlotKey, reason: &str) -> Result<(), PlatformError> {
        self.host.loader.fail(slot, reason)?;
        self.pump();
        Ok(())
    }

    /// Deliver a message directly, as a platform callback would.
    pub fn dispatch(&mut self, message: Message) {
        self.inbox.post(message);
        self.pump();
    }

    /// Run every timer due within `by`, in order, then move the clock to the
    /// end of the window.
    pub fn advance(&mut self, by: Duration) {
        let until = self.host.scheduler.now() + by;
        loop {
            self.pump();
            match self.host.scheduler.pop_due(until) {
                Some(message) => self.session.handle(message, &mut self.host),
                None => break,
            }
        }
        self.host.scheduler.advance_clock(until);
    }

    /// Handle every queued input and completion.
    pub fn pump(&mut self) {
        loop {
            let message = match self.inbox.take_one() {
                Some(message) => message,
                None => match self.host.load_events.take_one() {
                    Some(event) => Message::from(event),
                    None => break,
                },
            };
            self.session.handle(message, &mut self.host);
        }
    }

    pub fn shutdown(&mut self) {
        self.session.shutdown(&mut self.host);
    }

    /// Virtual time since the runtime was created.
    pub fn now(&self) -> Duration {
        self.host.scheduler.now()
    }

    pub fn session(&self) -> &CarouselSession {
        &self.session
    }

    pub fn host(&self) -> &HeadlessHost {
        &self.host
    }

    pub fn selector(&self) -> &CitySelector {
        &self.selector
    }
}
