//! Shared message queue between platform callbacks and the carousel.
//!
//! Platform callbacks (timers, image completions, input events) never touch
//! carousel state directly. They post into a `Mailbox` and the owner drains it
//! on its own turn of the event loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

type Waker = Rc<dyn Fn()>;

/// Single-threaded FIFO shared by cloning.
pub struct Mailbox<M> {
    queue: Rc<RefCell<VecDeque<M>>>,
    waker: Rc<RefCell<Option<Waker>>>,
}

impl<M> Mailbox<M> {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
            waker: Rc::new(RefCell::new(None)),
        }
    }

    /// Queue a message and run the waker, if one is set.
    pub fn post(&self, message: M) {
        self.queue.borrow_mut().push_back(message);
        let waker = self.waker.borrow().clone();
        if let Some(wake) = waker {
            wake();
        }
    }

    /// Take the oldest queued message.
    pub fn take_one(&self) -> Option<M> {
        self.queue.borrow_mut().pop_front()
    }

    /// Take every queued message in arrival order.
    pub fn drain(&self) -> Vec<M> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Install a function run after every `post`.
    pub fn set_waker<F>(&self, wake: F)
    where
        F: Fn() + 'static,
    {
        *self.waker.borrow_mut() = Some(Rc::new(wake));
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Check if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl<M> Clone for Mailbox<M> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
            waker: Rc::clone(&self.waker),
        }
    }
}

impl<M> Default for Mailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fifo_across_clones() {
        let inbox = Mailbox::new();
        let sender = inbox.clone();
        sender.post(1);
        sender.post(2);
        inbox.post(3);

        assert_eq!(inbox.len(), 3);
        assert_eq!(inbox.take_one(), Some(1));
        assert_eq!(inbox.drain(), vec![2, 3]);
        assert!(sender.is_empty());
    }

    #[test]
    fn test_waker_runs_after_post() {
        let inbox = Mailbox::new();
        let wakes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&wakes);
        inbox.set_waker(move || counter.set(counter.get() + 1));

        inbox.post("tick");
        inbox.post("tick");
        assert_eq!(wakes.get(), 2);
    }

    #[test]
    fn test_waker_may_drain() {
        let inbox: Mailbox<u32> = Mailbox::new();
        let reader = inbox.clone();
        let seen = Rc::new(Cell::new(0));
        let total = Rc::clone(&seen);
        inbox.set_waker(move || {
            for n in reader.drain() {
                total.set(total.get() + n);
            }
        });

        inbox.post(4);
        inbox.post(5);
        assert_eq!(seen.get(), 9);
        assert!(inbox.is_empty());
    }
}
