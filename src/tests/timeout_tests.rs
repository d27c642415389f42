//! Tests for giving up on hung image requests.

use backdrop_platform::LoadEvent;

use super::*;
use crate::message::Message;
use crate::state::Lifecycle;

fn with_timeout(timeout_ms: u64) -> HeadlessRuntime {
    let mut config = CarouselConfig::for_cities(&["sf", "nyc"], 4);
    config.load_timeout_ms = Some(timeout_ms);
    let mut rt = runtime_with(config);
    rt.start();
    rt
}

#[test]
fn test_hung_loads_are_abandoned() {
    let mut rt = with_timeout(3_000);
    rt.complete_load(&slot("sf", 1)).unwrap();

    rt.advance(ms(3_000));

    assert_eq!(rt.host().loader.cancelled().len(), 7);
    assert!(rt.host().loader.pending_tags().is_empty());
    assert!(rt.session().is_abandoned(&slot("nyc", 1)));
    assert!(!rt.session().is_abandoned(&slot("sf", 1)));

    rt.dispatch(Message::Load(LoadEvent::Loaded(slot("nyc", 1))));
    assert!(!is_ready(&rt, "nyc", 1));
}

#[test]
fn test_completion_disarms_timeout() {
    let mut rt = with_timeout(3_000);
    rt.complete_load(&slot("sf", 1)).unwrap();
    rt.complete_load(&slot("nyc", 2)).unwrap();

    rt.advance(ms(3_000));

    assert!(is_ready(&rt, "nyc", 2));
    assert!(!rt.session().is_abandoned(&slot("nyc", 2)));
    assert!(rt.session().is_abandoned(&slot("sf", 3)));
    assert_eq!(rt.host().loader.cancelled().len(), 6);
    assert_eq!(rt.host().scheduler.pending(), 1);
}

#[test]
fn test_abandoned_first_image_keeps_placeholder() {
    let mut rt = with_timeout(3_000);
    rt.advance(ms(3_000));

    assert!(rt.session().is_abandoned(&slot("sf", 1)));
    assert_eq!(rt.session().first_paint_state(), Lifecycle::InProgress);
    assert_eq!(rt.session().active_slot(), None);
    assert!(rt.host().stage.is_revealed());
}

#[test]
fn test_without_timeout_loads_wait_forever() {
    let mut rt = started(&["sf", "nyc"], 4);
    rt.advance(ms(60_000));

    assert_eq!(rt.host().loader.pending_tags().len(), 7);
    assert!(rt.host().loader.cancelled().is_empty());
    assert!(!rt.session().is_abandoned(&slot("nyc", 1)));
    assert_eq!(rt.session().active_slot(), Some(slot("sf", 1)));
}
