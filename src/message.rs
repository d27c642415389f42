//! Messages driving a carousel session.
//!
//! Every platform callback (timer, image completion, user input) reaches the
//! session as one of these, one at a time.

use backdrop_platform::LoadEvent;

use crate::animation::FadeId;
use crate::model::SlotKey;

/// Messages that can be sent to update session state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Rotation timer fired
    Tick,
    /// The user picked a city in the selector
    CitySelected(String),
    /// The pause after a city change is over
    Settled,
    /// A fade is due for its next opacity step
    FadeStep(FadeId),
    /// An image request completed
    Load(LoadEvent<SlotKey>),
    /// An image request ran past the configured timeout
    LoadTimedOut(SlotKey),
}

impl From<LoadEvent<SlotKey>> for Message {
    fn from(event: LoadEvent<SlotKey>) -> Self {
        Message::Load(event)
    }
}
