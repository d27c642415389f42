use std::cell::RefCell;
use std::rc::Rc;

use backdrop_platform::web::{self, DomImageLoader, DomScheduler, DomStage};
use backdrop_platform::{ImageLoader, LoadEvent, Mailbox, PlatformError, Scheduler, Stage};
use wasm_bindgen::prelude::*;
use web_sys::HtmlSelectElement;

use crate::config::CarouselConfig;
use crate::error::StartupError;
use crate::host::Host;
use crate::message::Message;
use crate::model::SlotKey;
use crate::selector::CHANGE_EVENT;
use crate::session::CarouselSession;

struct DomHost {
    stage: DomStage,
    scheduler: DomScheduler<Message>,
    loader: DomImageLoader<SlotKey>,
}

impl Host for DomHost {
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

struct WebCarousel {
    session: CarouselSession,
    host: DomHost,
    inbox: Mailbox<Message>,
    load_events: Mailbox<LoadEvent<SlotKey>>,
    selector: Option<SelectorBinding>,
}

/// The selector's `change` listener, kept so it can be unbound.
struct SelectorBinding {
    select: HtmlSelectElement,
    on_change: Closure<dyn FnMut(web_sys::Event)>,
}

impl SelectorBinding {
    fn unbind(self) {
        if let Err(e) = self
            .select
            .remove_event_listener_with_callback(CHANGE_EVENT, self.on_change.as_ref().unchecked_ref())
        {
            log::warn!("Failed to unbind city selector: {:?}", e);
        }
    }
}

impl WebCarousel {
    fn pump(&mut self) {
        loop {
            let message = match self.inbox.take_one() {
                Some(message) => message,
                None => match self.load_events.take_one() {
                    Some(event) => Message::from(event),
                    None => break,
                },
            };
            self.session.handle(message, &mut self.host);
        }
    }
}

thread_local! {
    static CAROUSEL: RefCell<Option<Rc<RefCell<WebCarousel>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::log_1(&format!("Logger already initialised: {}", e).into());
    }
}

/// Start the carousel with cities read from the page's selector.
#[wasm_bindgen]
pub fn start_carousel(
    container_id: &str,
    placeholder_id: &str,
    images_per_city: u32,
) -> Result<(), JsValue> {
    let selector_id = crate::constants::page::SELECTOR_ID;
    let select = web::select_element(selector_id).map_err(to_js)?;
    let cities = web::option_values(&select);

    let mut config = CarouselConfig::for_cities(&[], images_per_city);
    config.cities = cities;
    config.default_city = Some(select.value());
    config.page.container_id = container_id.to_string();
    config.page.placeholder_id = placeholder_id.to_string();

    launch(config).map_err(to_js)
}

/// Start the carousel from a JSON configuration.
#[wasm_bindgen]
pub fn start_carousel_with_config(json: &str) -> Result<(), JsValue> {
    let config = CarouselConfig::from_json(json).map_err(to_js)?;
    launch(config).map_err(to_js)
}

fn launch(config: CarouselConfig) -> Result<(), StartupError> {
    log::set_max_level(config.log_level.to_level_filter());
    let session = CarouselSession::new(&config, web::viewport_width()?)?;

    let inbox = Mailbox::new();
    let load_events = Mailbox::new();
    let host = DomHost {
        stage: DomStage::new(&config.page.container_id, &config.page.loaded_class)?,
        scheduler: DomScheduler::new(inbox.clone())?,
        loader: DomImageLoader::new(load_events.clone()),
    };

    let carousel = Rc::new(RefCell::new(WebCarousel {
        session,
        host,
        inbox: inbox.clone(),
        load_events: load_events.clone(),
        selector: None,
    }));

    // A post made while the carousel is busy stays queued; the running pump
    // picks it up before returning.
    let wake = {
        let carousel = Rc::downgrade(&carousel);
        move || {
            if let Some(carousel) = carousel.upgrade() {
                if let Ok(mut carousel) = carousel.try_borrow_mut() {
                    carousel.pump();
                }
            }
        }
    };
    inbox.set_waker(wake.clone());
    load_events.set_waker(wake);

    let select = web::select_element(&config.page.selector_id)?;
    let on_change = {
        let select = select.clone();
        let inbox = inbox.clone();
        Closure::wrap(Box::new(move |_event: web_sys::Event| {
            inbox.post(Message::CitySelected(select.value()));
        }) as Box<dyn FnMut(web_sys::Event)>)
    };
    select
        .add_event_listener_with_callback(CHANGE_EVENT, on_change.as_ref().unchecked_ref())
        .map_err(|e| PlatformError::Js(format!("{:?}", e)))?;

    {
        let mut guard = carousel.borrow_mut();
        guard.selector = Some(SelectorBinding { select, on_change });
        let WebCarousel { session, host, .. } = &mut *guard;
        session.start(host);
        guard.pump();
    }

    CAROUSEL.with(|slot| *slot.borrow_mut() = Some(carousel));
    Ok(())
}

/// Tear down the running carousel, cancelling its timers and fades and
/// unbinding the city selector.
#[wasm_bindgen]
pub fn stop_carousel() {
    CAROUSEL.with(|slot| {
        if let Some(carousel) = slot.borrow_mut().take() {
            let mut guard = carousel.borrow_mut();
            if let Some(binding) = guard.selector.take() {
                binding.unbind();
            }
            let WebCarousel { session, host, .. } = &mut *guard;
            session.shutdown(host);
        }
    });
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
