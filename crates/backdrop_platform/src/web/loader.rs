//! `ImageLoader` backed by `HtmlImageElement`.

use std::cell::RefCell;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::loader::{ImageLoader, LoadEvent, LoadStatus};
use crate::mailbox::Mailbox;
use crate::registry::Registry;

struct InFlight {
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

/// Loader issuing one `Image` per request.
///
/// An image the browser already holds reports `complete` with a non-zero
/// natural width right after `src` is set; such requests return
/// `LoadStatus::Complete` because some browsers never fire `load` for them.
/// A request leaves the registry when its `load` or `error` handler runs.
pub struct DomImageLoader<T> {
    events: Mailbox<LoadEvent<T>>,
    in_flight: Rc<RefCell<Registry<T, InFlight>>>,
}

impl<T> DomImageLoader<T>
where
    T: Clone + Eq + Hash + Debug + 'static,
{
    /// Create a loader posting completions into `events`.
    pub fn new(events: Mailbox<LoadEvent<T>>) -> Self {
        Self {
            events,
            in_flight: Rc::new(RefCell::new(Registry::new())),
        }
    }
}

impl<T> ImageLoader<T> for DomImageLoader<T>
where
    T: Clone + Eq + Hash + Debug + 'static,
{
    fn load(&mut self, url: &str, tag: T) -> LoadStatus {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                self.events.post(LoadEvent::Failed {
                    tag,
                    reason: format!("{:?}", e),
                });
                return LoadStatus::Pending;
            }
        };

        let loaded = {
            let events = self.events.clone();
            let in_flight = Rc::downgrade(&self.in_flight);
            let tag = tag.clone();
            Closure::once(move || {
                if let Some(in_flight) = in_flight.upgrade() {
                    in_flight.borrow_mut().finish(&tag);
                }
                events.post(LoadEvent::Loaded(tag));
            })
        };
        let failed = {
            let events = self.events.clone();
            let in_flight = Rc::downgrade(&self.in_flight);
            let tag = tag.clone();
            let url = url.to_string();
            Closure::once(move || {
                if let Some(in_flight) = in_flight.upgrade() {
                    in_flight.borrow_mut().finish(&tag);
                }
                events.post(LoadEvent::Failed {
                    tag,
                    reason: format!("failed to load {}", url),
                })
            })
        };

        image.set_src(url);
        if image.complete() && image.natural_width() != 0 {
            return LoadStatus::Complete;
        }

        image.set_onload(Some(loaded.as_ref().unchecked_ref()));
        image.set_onerror(Some(failed.as_ref().unchecked_ref()));
        self.in_flight.borrow_mut().insert(
            tag,
            InFlight {
                image,
                _onload: loaded,
                _onerror: failed,
            },
        );
        LoadStatus::Pending
    }

    fn cancel(&mut self, tag: &T) {
        let request = self.in_flight.borrow_mut().remove(tag);
        if let Some(request) = request {
            request.image.set_onload(None);
            request.image.set_onerror(None);
        }
    }
}
