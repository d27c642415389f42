//! Tests for the priority load of the first image.

use backdrop_platform::LoadEvent;

use super::*;
use crate::constants::{page, tags};
use crate::message::Message;
use crate::state::Lifecycle;

#[test]
fn test_placeholder_shown_while_first_image_loads() {
    let mut rt = runtime(&["sf", "nyc"], 4);
    rt.start();

    let session = rt.session();
    assert_eq!(session.first_paint_state(), Lifecycle::InProgress);
    assert_eq!(session.preload_state(), Lifecycle::NotStarted);
    assert_eq!(session.active_slot(), None);
    assert_eq!(
        session.state().active_handle.as_ref().map(|h| h.id()),
        Some(page::PLACEHOLDER_ID)
    );
    assert_eq!(z_index(&rt, page::PLACEHOLDER_ID), 2);
    assert_eq!(rt.host().stage.reveal_count(), 1);

    let requests = rt.host().loader.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "/images/sf-1-1600.jpg");
}

#[test]
fn test_first_image_replaces_placeholder() {
    let rt = started(&["sf", "nyc"], 4);
    let stage = &rt.host().stage;

    assert_eq!(rt.session().active_slot(), Some(slot("sf", 1)));
    assert_eq!(rt.session().first_paint_state(), Lifecycle::Done);
    assert!(is_ready(&rt, "sf", 1));

    assert_eq!(z_index(&rt, page::PLACEHOLDER_ID), 1);
    assert_eq!(z_index(&rt, "sf-1"), 2);
    assert!(stage.has_tag("sf-1", tags::BACKGROUND_IMAGE));
    assert!(!stage.has_tag("sf-1", tags::OFFSCREEN));
    assert_eq!(stage.background_of("sf-1"), Some("/images/sf-1-1600.jpg"));
    // Swapped by z-order only, no fade.
    assert_eq!(rt.session().animator().running_count(), 0);
    assert_eq!(stage.reveal_count(), 1);
}

#[test]
fn test_first_image_hands_off_to_preloader() {
    let rt = started(&["sf", "nyc"], 4);
    let stage = &rt.host().stage;

    assert_eq!(rt.session().preload_state(), Lifecycle::Done);
    assert_eq!(rt.host().loader.requests().len(), 8);
    for id in ["sf-2", "sf-3", "sf-4", "nyc-1", "nyc-2", "nyc-3", "nyc-4"] {
        assert!(stage.has_tag(id, tags::OFFSCREEN), "{} should be off stage", id);
        assert!(stage.has_tag(id, tags::BACKGROUND_IMAGE));
    }
    assert_eq!(stage.background_of("nyc-3"), Some("/images/nyc-3-1600.jpg"));
}

#[test]
fn test_cached_first_image_skips_placeholder() {
    let mut rt = runtime(&["sf", "nyc"], 4);
    rt.precache(&slot("sf", 1));
    rt.start();

    assert_eq!(rt.session().first_paint_state(), Lifecycle::Done);
    assert_eq!(rt.session().active_slot(), Some(slot("sf", 1)));
    assert_eq!(z_index(&rt, page::PLACEHOLDER_ID), 0);
    assert_eq!(rt.session().preload_state(), Lifecycle::Done);
    assert_eq!(rt.host().loader.pending_tags().len(), 7);
    assert_eq!(rt.host().stage.reveal_count(), 1);
}

#[test]
fn test_duplicate_completion_is_harmless() {
    let mut rt = started(&["sf", "nyc"], 4);
    rt.dispatch(Message::Load(LoadEvent::Loaded(slot("sf", 1))));

    assert_eq!(rt.host().loader.request_count(&slot("sf", 1)), 1);
    assert_eq!(rt.host().loader.requests().len(), 8);
    assert_eq!(rt.session().cache().len(), 1);
    assert_eq!(rt.session().active_slot(), Some(slot("sf", 1)));
    assert_eq!(z_index(&rt, page::PLACEHOLDER_ID), 1);
    assert_eq!(rt.host().stage.reveal_count(), 1);
}

#[test]
fn test_start_twice_is_ignored() {
    let mut rt = runtime(&["sf"], 2);
    rt.start();
    rt.start();

    assert_eq!(rt.host().loader.requests().len(), 1);
    assert_eq!(rt.host().scheduler.pending(), 1);
}

#[test]
fn test_failed_first_image_keeps_placeholder() {
    let mut rt = runtime(&["sf", "nyc"], 4);
    rt.start();
    rt.fail_load(&slot("sf", 1), "404").expect("pending");

    assert!(!is_ready(&rt, "sf", 1));
    assert_eq!(rt.session().first_paint_state(), Lifecycle::InProgress);
    assert_eq!(z_index(&rt, page::PLACEHOLDER_ID), 2);
    assert!(rt.host().stage.is_revealed());
}
