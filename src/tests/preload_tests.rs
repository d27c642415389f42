//! Tests for the one-time background load of every slot.

use backdrop_platform::LoadEvent;

use super::*;
use crate::message::Message;
use crate::state::Lifecycle;

#[test]
fn test_preload_order_is_city_major() {
    let rt = started(&["sf", "nyc"], 4);

    let order: Vec<SlotKey> = rt
        .host()
        .loader
        .requests()
        .iter()
        .map(|(_, tag)| tag.clone())
        .collect();
    assert_eq!(
        order,
        vec![
            slot("sf", 1),
            slot("sf", 2),
            slot("sf", 3),
            slot("sf", 4),
            slot("nyc", 1),
            slot("nyc", 2),
            slot("nyc", 3),
            slot("nyc", 4),
        ]
    );
}

#[test]
fn test_each_slot_requested_once() {
    let mut rt = started(&["sf", "nyc"], 3);
    rt.select_city("nyc");
    rt.advance(ms(2_500));
    rt.select_city("sf");
    rt.advance(ms(2_500));

    for key in rt.session().catalog().slots() {
        assert_eq!(rt.host().loader.request_count(&key), 1, "{}", key);
    }
}

#[test]
fn test_completions_recorded_in_any_order() {
    let mut rt = started(&["sf", "nyc"], 4);
    assert!(!is_ready(&rt, "nyc", 3));
    assert!(!is_ready(&rt, "sf", 2));

    rt.complete_load(&slot("nyc", 3)).unwrap();
    rt.complete_load(&slot("sf", 2)).unwrap();

    assert!(is_ready(&rt, "nyc", 3));
    assert!(is_ready(&rt, "sf", 2));
    assert!(!is_ready(&rt, "sf", 3));

    // Stays ready whatever happens next.
    rt.fail_load(&slot("sf", 3), "timeout").unwrap();
    rt.dispatch(Message::Load(LoadEvent::Loaded(slot("nyc", 3))));
    rt.advance(ms(20_000));
    assert!(is_ready(&rt, "nyc", 3));
    assert!(is_ready(&rt, "sf", 2));
}

#[test]
fn test_precached_slot_recorded_without_completion() {
    let mut rt = runtime(&["sf", "nyc"], 4);
    rt.precache(&slot("nyc", 2));
    rt.start();
    rt.complete_load(&slot("sf", 1)).unwrap();

    assert!(is_ready(&rt, "nyc", 2));
    assert!(!rt.host().loader.pending_tags().contains(&slot("nyc", 2)));
    assert_eq!(rt.host().loader.pending_tags().len(), 6);
}

#[test]
fn test_city_change_before_first_image_starts_preload() {
    let mut rt = runtime(&["sf", "nyc"], 4);
    rt.start();
    rt.select_city("nyc");

    assert_eq!(rt.session().preload_state(), Lifecycle::Done);
    assert_eq!(rt.session().first_paint_state(), Lifecycle::InProgress);
    assert_eq!(rt.host().loader.request_count(&slot("sf", 1)), 1);
    assert_eq!(rt.host().loader.request_count(&slot("nyc", 1)), 1);
    assert_eq!(rt.host().loader.requests().len(), 8);
    // The first slot stays with the fast path.
    assert!(rt.host().stage.element("sf-1").is_none());
}

#[test]
fn test_failed_load_stays_not_ready() {
    let mut rt = started(&["sf", "nyc"], 4);
    rt.fail_load(&slot("sf", 2), "404").unwrap();

    assert!(!is_ready(&rt, "sf", 2));
    assert_eq!(rt.host().loader.request_count(&slot("sf", 2)), 1);

    rt.advance(ms(5_000));
    assert_eq!(rt.session().active_slot(), Some(slot("sf", 1)));
}
