//! Run-once guard.

/// Progress of a task that may run at most once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl Lifecycle {
    /// Move `NotStarted` to `InProgress`. Returns false if the task already
    /// began, in which case the caller must not start it again.
    pub fn begin(&mut self) -> bool {
        if *self != Lifecycle::NotStarted {
            return false;
        }
        *self = Lifecycle::InProgress;
        true
    }

    /// Mark the task finished. Returns false if it was already finished.
    pub fn finish(&mut self) -> bool {
        if *self == Lifecycle::Done {
            return false;
        }
        *self = Lifecycle::Done;
        true
    }

    pub fn has_started(&self) -> bool {
        *self != Lifecycle::NotStarted
    }

    pub fn is_done(&self) -> bool {
        *self == Lifecycle::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_once() {
        let mut guard = Lifecycle::default();
        assert!(guard.begin());
        assert!(!guard.begin());
        assert_eq!(guard, Lifecycle::InProgress);
    }

    #[test]
    fn test_finish_once() {
        let mut guard = Lifecycle::default();
        guard.begin();
        assert!(guard.finish());
        assert!(!guard.finish());
        assert!(!guard.begin());
        assert!(guard.is_done());
    }

    #[test]
    fn test_finish_without_begin() {
        let mut guard = Lifecycle::NotStarted;
        assert!(guard.finish());
        assert!(guard.has_started());
    }
}
