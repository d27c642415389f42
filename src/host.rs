//! Platform services a session runs against.

use backdrop_platform::{ImageLoader, Scheduler, Stage};

use crate::message::Message;
use crate::model::SlotKey;

/// Bundle of the platform capabilities used by a session.
///
/// Accessors are called one at a time, so implementations simply hand out
/// their fields.
pub trait Host {
    fn stage(&mut self) -> &mut dyn Stage;
    fn scheduler(&mut self) -> &mut dyn Scheduler<Message>;
    fn loader(&mut self) -> &mut dyn ImageLoader<SlotKey>;
}
