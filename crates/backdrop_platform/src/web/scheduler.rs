//! `Scheduler` on top of `setTimeout` / `setInterval`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::window;
use crate::error::PlatformError;
use crate::mailbox::Mailbox;
use crate::registry::Registry;
use crate::schedule::{Scheduler, TimerId};

enum Handle {
    Timeout(i32),
    Interval(i32, Closure<dyn FnMut()>),
}

/// Scheduler that posts fired messages into a mailbox.
///
/// One-shot timers leave the registry when they fire, so `cancel` only
/// succeeds for timers that are still pending.
pub struct DomScheduler<M> {
    window: Window,
    outbox: Mailbox<M>,
    next_id: u64,
    handles: Rc<RefCell<Registry<TimerId, Handle>>>,
}

impl<M: Clone + 'static> DomScheduler<M> {
    /// Create a scheduler delivering into `outbox`.
    pub fn new(outbox: Mailbox<M>) -> Result<Self, PlatformError> {
        Ok(Self {
            window: window()?,
            outbox,
            next_id: 0,
            handles: Rc::new(RefCell::new(Registry::new())),
        })
    }

    fn next_timer(&mut self) -> TimerId {
        let id = TimerId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }
}

fn millis(duration: Duration) -> i32 {
    duration.as_millis().min(i32::MAX as u128) as i32
}

impl<M: Clone + 'static> Scheduler<M> for DomScheduler<M> {
    fn schedule_once(&mut self, delay: Duration, message: M) -> TimerId {
        let id = self.next_timer();
        let outbox = self.outbox.clone();
        let handles = Rc::clone(&self.handles);
        let callback = Closure::once_into_js(move || {
            handles.borrow_mut().finish(&id);
            outbox.post(message);
        });
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            ) {
            Ok(raw) => {
                self.handles.borrow_mut().insert(id, Handle::Timeout(raw));
            }
            Err(e) => log::error!("setTimeout failed: {:?}", e),
        }
        id
    }

    fn schedule_repeating(&mut self, period: Duration, message: M) -> TimerId {
        let id = self.next_timer();
        let outbox = self.outbox.clone();
        let callback = Closure::wrap(Box::new(move || outbox.post(message.clone())) as Box<dyn FnMut()>);
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis(period),
            ) {
            Ok(raw) => {
                self.handles
                    .borrow_mut()
                    .insert(id, Handle::Interval(raw, callback));
            }
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let handle = self.handles.borrow_mut().remove(&id);
        match handle {
            Some(Handle::Timeout(raw)) => {
                self.window.clear_timeout_with_handle(raw);
                true
            }
            Some(Handle::Interval(raw, _callback)) => {
                self.window.clear_interval_with_handle(raw);
                true
            }
            None => false,
        }
    }
}
