//! Named events: time-triggered actions and the scheduler that promotes them.

pub(crate) mod action;
pub(crate) mod scheduler;

pub use action::EventAction;
pub use scheduler::{ActionId, EventScheduler};
