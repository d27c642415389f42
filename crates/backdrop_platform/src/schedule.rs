//! Cancellable timers.
//!
//! Timers deliver a message instead of running a closure, so the owner of the
//! carousel state handles every firing on its own turn. Each scheduled task is
//! identified by a `TimerId`, which doubles as its cancellation token.

use std::time::Duration;

/// Token for one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Build a token from a raw id. Only scheduler implementations need this.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Source of one-shot and repeating timers.
pub trait Scheduler<M> {
    /// Deliver `message` once after `delay`.
    fn schedule_once(&mut self, delay: Duration, message: M) -> TimerId;

    /// Deliver `message` every `period` until cancelled.
    fn schedule_repeating(&mut self, period: Duration, message: M) -> TimerId;

    /// Cancel a task. Returns false if it already fired (one-shot) or was
    /// never scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

struct Entry<M> {
    id: TimerId,
    due: Duration,
    seq: u64,
    period: Option<Duration>,
    message: M,
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Nothing fires on its own: the owner calls `pop_due` to advance time to the
/// next due task. Tasks due at the same instant fire in scheduling order.
pub struct VirtualScheduler<M> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry<M>>,
}

/// Repeating tasks never fire more often than this.
const MIN_PERIOD: Duration = Duration::from_millis(1);

impl<M: Clone> VirtualScheduler<M> {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Due time of the earliest task.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.iter().map(|entry| entry.due).min()
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether `id` is still scheduled.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Fire the earliest task due at or before `until`, moving the clock to
    /// its due time. Repeating tasks are re-armed one period later.
    pub fn pop_due(&mut self, until: Duration) -> Option<M> {
        let position = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(_, entry)| (entry.due, entry.seq))
            .map(|(position, _)| position)?;

        let due = self.entries[position].due;
        self.now = self.now.max(due);

        match self.entries[position].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[position];
                entry.due = due + period;
                entry.seq = seq;
                Some(entry.message.clone())
            }
            None => Some(self.entries.swap_remove(position).message),
        }
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, message: M) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            seq,
            period,
            message,
        });
        id
    }
}

impl<M: Clone> Default for VirtualScheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> Scheduler<M> for VirtualScheduler<M> {
    fn schedule_once(&mut self, delay: Duration, message: M) -> TimerId {
        self.push(delay, None, message)
    }

    fn schedule_repeating(&mut self, period: Duration, message: M) -> TimerId {
        let period = period.max(MIN_PERIOD);
        self.push(period, Some(period), message)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut sched = VirtualScheduler::new();
        sched.schedule_once(ms(100), "settle");

        assert_eq!(sched.pop_due(ms(99)), None);
        assert_eq!(sched.pop_due(ms(100)), Some("settle"));
        assert_eq!(sched.now(), ms(100));
        assert_eq!(sched.pop_due(ms(1_000)), None);
    }

    #[test]
    fn test_repeating_rearms() {
        let mut sched = VirtualScheduler::new();
        let id = sched.schedule_repeating(ms(50), "tick");

        let mut fired = 0;
        while sched.pop_due(ms(200)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 4);
        assert!(sched.is_scheduled(id));
        assert_eq!(sched.next_due(), Some(ms(250)));
    }

    #[test]
    fn test_same_instant_fires_in_order() {
        let mut sched = VirtualScheduler::new();
        sched.schedule_once(ms(10), 1);
        sched.schedule_once(ms(10), 2);
        sched.schedule_once(ms(5), 0);

        assert_eq!(sched.pop_due(ms(10)), Some(0));
        assert_eq!(sched.pop_due(ms(10)), Some(1));
        assert_eq!(sched.pop_due(ms(10)), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut sched = VirtualScheduler::new();
        let once = sched.schedule_once(ms(10), "a");
        let every = sched.schedule_repeating(ms(10), "b");

        assert!(sched.cancel(once));
        assert!(!sched.cancel(once));
        assert!(sched.cancel(every));
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.pop_due(ms(100)), None);
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut sched = VirtualScheduler::new();
        sched.advance_clock(ms(1_000));
        sched.schedule_once(ms(20), "fade");
        assert_eq!(sched.next_due(), Some(ms(1_020)));

        sched.advance_clock(ms(10));
        assert_eq!(sched.now(), ms(1_000));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut sched = VirtualScheduler::new();
        sched.schedule_repeating(Duration::ZERO, ());
        assert_eq!(sched.next_due(), Some(MIN_PERIOD));
    }
}
