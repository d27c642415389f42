//! Event binding for platform targets.
//!
//! An `EventHub` belongs to a single event target (a select control, an image
//! request, the window) and keeps the handlers bound to each named event.

use crate::callback::Listener;

/// Identifies one bound handler so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Named-event dispatcher with `on`/`off`/`emit`.
pub struct EventHub<A> {
    next_id: u64,
    listeners: Vec<(ListenerId, String, Listener<A>)>,
}

impl<A> EventHub<A> {
    /// Create a hub with no handlers bound.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Bind `handler` to `event`. Handlers run in bind order.
    pub fn on<F>(&mut self, event: &str, handler: F) -> ListenerId
    where
        F: Fn(&A) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .push((id, event.to_string(), Listener::new(handler)));
        id
    }

    /// Unbind a handler. Returns false if it was not bound.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(bound, _, _)| *bound != id);
        self.listeners.len() != before
    }

    /// Fire `event`, returning how many handlers ran.
    pub fn emit(&self, event: &str, arg: &A) -> usize {
        self.listeners
            .iter()
            .filter(|(_, name, _)| name == event)
            .filter(|(_, _, listener)| listener.call(arg))
            .count()
    }

    /// Number of handlers bound to `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .iter()
            .filter(|(_, name, _)| name == event)
            .count()
    }
}

impl<A> Default for EventHub<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for EventHub<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_only_reaches_named_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::new();

        let sink = Rc::clone(&seen);
        hub.on("change", move |v: &String| sink.borrow_mut().push(v.clone()));

        assert_eq!(hub.emit("change", &"rome".to_string()), 1);
        assert_eq!(hub.emit("load", &"ignored".to_string()), 0);
        assert_eq!(*seen.borrow(), vec!["rome".to_string()]);
    }

    #[test]
    fn test_off_unbinds() {
        let mut hub: EventHub<u8> = EventHub::new();
        let first = hub.on("change", |_| {});
        hub.on("change", |_| {});
        assert_eq!(hub.listener_count("change"), 2);

        assert!(hub.off(first));
        assert!(!hub.off(first));
        assert_eq!(hub.emit("change", &0), 1);
    }
}
