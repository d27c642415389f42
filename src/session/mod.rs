//! A carousel session: every piece of mutable carousel state, owned in one
//! place and driven one message at a time.
//!
//! The behaviour is split over several files, each adding an `impl` block:
//! - `first_paint` - priority load of the first image and the placeholder
//! - `preload` - one-time background load of every other slot
//! - `carousel` - rotation timer, cross-fades and city changes
//! - `loads` - request bookkeeping, completions and timeouts

mod carousel;
mod first_paint;
mod loads;
mod preload;

use std::time::Duration;

use backdrop_platform::DisplayHandle;

use crate::animation::Animator;
use crate::config::{CarouselConfig, Timings};
use crate::constants::{tags, z_order};
use crate::error::ConfigError;
use crate::host::Host;
use crate::message::Message;
use crate::model::{ImageCatalog, SizeClass, SlotKey};
use crate::state::{CarouselState, Lifecycle, SlotCache};

use loads::LoadTracker;

/// Owned state of one carousel on one page.
pub struct CarouselSession {
    catalog: ImageCatalog,
    timings: Timings,
    placeholder_id: String,
    load_timeout: Option<Duration>,
    cache: SlotCache,
    carousel: CarouselState,
    first_paint: Lifecycle,
    placeholder_shown: bool,
    preload: Lifecycle,
    animator: Animator,
    loads: LoadTracker,
    page_revealed: bool,
    shut_down: bool,
}

impl CarouselSession {
    /// Create a session for `config`. The size class is fixed here from
    /// `viewport_width` and never recomputed.
    pub fn new(config: &CarouselConfig, viewport_width: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let size_class = SizeClass::from_viewport_width(viewport_width);
        let catalog = ImageCatalog::new(config, size_class);
        log::info!(
            "🖼️ Carousel for {} cities x {} images, size class {} ({}px viewport)",
            catalog.cities().len(),
            catalog.images_per_city(),
            size_class.name(),
            viewport_width
        );

        Ok(Self {
            carousel: CarouselState::new(catalog.default_city()),
            catalog,
            timings: config.timings,
            placeholder_id: config.page.placeholder_id.clone(),
            load_timeout: config.load_timeout(),
            cache: SlotCache::new(),
            first_paint: Lifecycle::default(),
            placeholder_shown: false,
            preload: Lifecycle::default(),
            animator: Animator::new(config.timings.fade_step()),
            loads: LoadTracker::default(),
            page_revealed: false,
            shut_down: false,
        })
    }

    /// Kick off the first-paint load and arm the rotation timer.
    pub fn start(&mut self, host: &mut dyn Host) {
        if self.first_paint.has_started() || self.shut_down {
            log::warn!("Carousel session already started");
            return;
        }
        self.begin_first_paint(host);
        self.start_rotation(host);
    }

    /// Process one message.
    pub fn handle(&mut self, message: Message, host: &mut dyn Host) {
        if self.shut_down {
            log::debug!("Ignoring {:?} after shutdown", message);
            return;
        }
        match message {
            Message::Tick => self.on_tick(host),
            Message::CitySelected(city) => self.on_city_selected(&city, host),
            Message::Settled => self.on_settled(host),
            Message::FadeStep(id) => {
                self.animator.advance(id, host);
            }
            Message::Load(event) => self.on_load_event(event, host),
            Message::LoadTimedOut(slot) => self.on_load_timeout(&slot, host),
        }
    }

    /// Cancel every timer, fade and outstanding request. The session ignores
    /// all messages afterwards.
    pub fn shutdown(&mut self, host: &mut dyn Host) {
        if self.shut_down {
            return;
        }
        self.stop_rotation(host);
        if let Some(timer) = self.carousel.settle_timer.take() {
            host.scheduler().cancel(timer);
        }
        self.animator.cancel_all(host);
        self.cancel_outstanding_loads(host);
        self.shut_down = true;
        log::info!("Carousel session shut down ({} images ready)", self.cache.len());
    }

    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &SlotCache {
        &self.cache
    }

    pub fn state(&self) -> &CarouselState {
        &self.carousel
    }

    pub fn size_class(&self) -> SizeClass {
        self.catalog.size_class()
    }

    pub fn first_paint_state(&self) -> Lifecycle {
        self.first_paint
    }

    pub fn preload_state(&self) -> Lifecycle {
        self.preload
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn is_page_revealed(&self) -> bool {
        self.page_revealed
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Slot on screen, if a real image (not the placeholder) is shown.
    pub fn active_slot(&self) -> Option<SlotKey> {
        let handle = self.carousel.active_handle.as_ref()?;
        let slot = SlotKey::new(self.carousel.active_city.clone(), self.carousel.active_index);
        (self.carousel.active_index > 0 && handle.id() == slot.element_id()).then_some(slot)
    }

    /// Whether the request for `slot` was given up after a timeout.
    pub fn is_abandoned(&self, slot: &SlotKey) -> bool {
        self.loads.is_abandoned(slot)
    }

    /// Unhide the page. Only the first call reaches the stage.
    fn reveal_page(&mut self, host: &mut dyn Host) {
        if self.page_revealed {
            return;
        }
        self.page_revealed = true;
        host.stage().reveal_page();
        log::info!("Page content revealed");
    }

    /// Existing element of `slot`, or a new one set up as a background slot.
    fn acquire_slot_element(&self, slot: &SlotKey, host: &mut dyn Host) -> DisplayHandle {
        let id = slot.element_id();
        if let Some(handle) = host.stage().find_element(&id) {
            return handle;
        }
        let stage = host.stage();
        let handle = stage.create_element(&id);
        stage.add_state_tag(&handle, tags::BACKGROUND_IMAGE);
        stage.set_z_index(&handle, z_order::ACTIVE);
        handle
    }

    /// Point the stage style of `slot` at its image url.
    fn register_style(&self, slot: &SlotKey, host: &mut dyn Host) {
        let url = self.catalog.url(slot);
        host.stage().register_background_style(&slot.element_id(), &url);
    }
}
