//! Listener abstraction for platform event handlers
//!
//! Event targets store their handlers as `Listener<A>` instead of spelling out
//! `Option<Box<dyn Fn(&A)>>` everywhere. A listener only performs side effects;
//! handlers that need to feed the carousel post a message into a mailbox.
//!
//! # Examples
//!
//! ```ignore
//! use backdrop_platform::{Listener, Mailbox};
//!
//! let inbox = Mailbox::new();
//! let sink = inbox.clone();
//! let listener = Listener::new(move |city: &String| sink.post(city.clone()));
//! listener.call(&"paris".to_string());
//! ```

use std::fmt;

/// A side-effect callback invoked with a borrowed event argument.
///
/// # Type Parameters
///
/// - `A`: The argument passed to the handler when the event fires
pub struct Listener<A> {
    f: Option<Box<dyn Fn(&A)>>,
}

impl<A> Listener<A> {
    /// Create a new listener from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty listener (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the listener, if it is set. Returns whether a handler ran.
    pub fn call(&self, arg: &A) -> bool {
        match self.f {
            Some(ref f) => {
                f(arg);
                true
            }
            None => false,
        }
    }

    /// Check if the listener is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }

    /// Check if the listener is not set.
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }
}

impl<A> Default for Listener<A> {
    fn default() -> Self {
        Self::none()
    }
}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_listener_call() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let listener = Listener::new(move |n: &u32| counter.set(counter.get() + *n));

        assert!(listener.call(&2));
        assert!(listener.call(&3));
        assert_eq!(hits.get(), 5);
    }

    #[test]
    fn test_empty_listener() {
        let listener: Listener<u32> = Listener::default();
        assert!(listener.is_none());
        assert!(!listener.call(&1));
    }
}
