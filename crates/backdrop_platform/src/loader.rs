//! Tagged image requests.
//!
//! A request carries a caller-chosen tag so the completion can be routed back
//! to the slot it belongs to. Completions are posted into a `Mailbox`; a
//! request the platform can satisfy on the spot reports `LoadStatus::Complete`
//! instead, so a late-bound completion is never lost.

use std::collections::HashSet;
use std::fmt::Debug;

use crate::error::PlatformError;
use crate::mailbox::Mailbox;

/// State of a request at the moment it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The resource was already available; no event will follow
    Complete,
    /// A `LoadEvent` will be posted later, or never
    Pending,
}

/// Completion of a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent<T> {
    /// The resource finished downloading
    Loaded(T),
    /// The platform gave up on the resource
    Failed {
        /// Tag of the failed request
        tag: T,
        /// Platform-provided reason
        reason: String,
    },
}

impl<T> LoadEvent<T> {
    /// Tag of the request this event completes.
    pub fn tag(&self) -> &T {
        match self {
            LoadEvent::Loaded(tag) => tag,
            LoadEvent::Failed { tag, .. } => tag,
        }
    }
}

/// Issues image requests.
pub trait ImageLoader<T> {
    /// Start loading `url`. The eventual `LoadEvent` carries `tag`.
    fn load(&mut self, url: &str, tag: T) -> LoadStatus;

    /// Stop caring about a pending request; no event will be posted for it.
    fn cancel(&mut self, _tag: &T) {}
}

/// Loader whose completions are driven by hand.
///
/// Urls marked with `precache` complete synchronously; everything else stays
/// pending until `complete` or `fail` is called for its tag.
pub struct ScriptedLoader<T> {
    events: Mailbox<LoadEvent<T>>,
    cached: HashSet<String>,
    requests: Vec<(String, T)>,
    pending: Vec<(String, T)>,
    cancelled: Vec<T>,
}

impl<T: Clone + PartialEq + Debug> ScriptedLoader<T> {
    /// Create a loader posting completions into `events`.
    pub fn new(events: Mailbox<LoadEvent<T>>) -> Self {
        Self {
            events,
            cached: HashSet::new(),
            requests: Vec::new(),
            pending: Vec::new(),
            cancelled: Vec::new(),
        }
    }

    /// Treat `url` as already in the platform cache.
    pub fn precache(&mut self, url: impl Into<String>) {
        self.cached.insert(url.into());
    }

    /// Every request issued so far, in order.
    pub fn requests(&self) -> &[(String, T)] {
        &self.requests
    }

    /// How many times `tag` was requested.
    pub fn request_count(&self, tag: &T) -> usize {
        self.requests.iter().filter(|(_, t)| t == tag).count()
    }

    /// Tags of the requests still waiting for a completion.
    pub fn pending_tags(&self) -> Vec<T> {
        self.pending.iter().map(|(_, tag)| tag.clone()).collect()
    }

    /// Tags passed to `cancel`.
    pub fn cancelled(&self) -> &[T] {
        &self.cancelled
    }

    /// Finish the pending request for `tag` successfully.
    pub fn complete(&mut self, tag: &T) -> Result<(), PlatformError> {
        let tag = self.take_pending(tag)?;
        self.events.post(LoadEvent::Loaded(tag));
        Ok(())
    }

    /// Finish the oldest pending request successfully.
    pub fn complete_next(&mut self) -> Option<T> {
        if self.pending.is_empty() {
            return None;
        }
        let (_, tag) = self.pending.remove(0);
        self.events.post(LoadEvent::Loaded(tag.clone()));
        Some(tag)
    }

    /// Fail the pending request for `tag`.
    pub fn fail(&mut self, tag: &T, reason: impl Into<String>) -> Result<(), PlatformError> {
        let tag = self.take_pending(tag)?;
        self.events.post(LoadEvent::Failed {
            tag,
            reason: reason.into(),
        });
        Ok(())
    }

    fn take_pending(&mut self, tag: &T) -> Result<T, PlatformError> {
        let position = self
            .pending
            .iter()
            .position(|(_, t)| t == tag)
            .ok_or_else(|| PlatformError::UnknownRequest {
                tag: format!("{:?}", tag),
            })?;
        Ok(self.pending.remove(position).1)
    }
}

impl<T: Clone + PartialEq + Debug> ImageLoader<T> for ScriptedLoader<T> {
    fn load(&mut self, url: &str, tag: T) -> LoadStatus {
        self.requests.push((url.to_string(), tag.clone()));
        if self.cached.contains(url) {
            log::trace!("{} served from cache", url);
            return LoadStatus::Complete;
        }
        self.pending.push((url.to_string(), tag));
        LoadStatus::Pending
    }

    fn cancel(&mut self, tag: &T) {
        self.pending.retain(|(_, t)| t != tag);
        self.cancelled.push(tag.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precached_completes_synchronously() {
        let events = Mailbox::new();
        let mut loader = ScriptedLoader::new(events.clone());
        loader.precache("/a.jpg");

        assert_eq!(loader.load("/a.jpg", 1), LoadStatus::Complete);
        assert_eq!(loader.load("/b.jpg", 2), LoadStatus::Pending);
        assert!(events.is_empty());
        assert_eq!(loader.pending_tags(), vec![2]);
    }

    #[test]
    fn test_complete_and_fail_post_events() {
        let events = Mailbox::new();
        let mut loader = ScriptedLoader::new(events.clone());
        loader.load("/a.jpg", "a");
        loader.load("/b.jpg", "b");

        assert!(loader.fail(&"b", "404").is_ok());
        assert!(loader.complete(&"a").is_ok());
        assert_eq!(
            events.drain(),
            vec![
                LoadEvent::Failed {
                    tag: "b",
                    reason: "404".to_string()
                },
                LoadEvent::Loaded("a"),
            ]
        );
    }

    #[test]
    fn test_unknown_completion_is_an_error() {
        let mut loader: ScriptedLoader<u32> = ScriptedLoader::new(Mailbox::new());
        assert!(matches!(
            loader.complete(&7),
            Err(PlatformError::UnknownRequest { .. })
        ));
    }

    #[test]
    fn test_cancel_drops_pending() {
        let events = Mailbox::new();
        let mut loader = ScriptedLoader::new(events.clone());
        loader.load("/a.jpg", 1);
        loader.cancel(&1);

        assert!(loader.pending_tags().is_empty());
        assert_eq!(loader.cancelled(), &[1]);
        assert!(loader.complete(&1).is_err());
        assert_eq!(loader.complete_next(), None);
    }
}
