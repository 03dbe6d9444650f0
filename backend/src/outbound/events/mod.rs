//! Change-notification adapters.

mod broadcast_task_events;

pub use broadcast_task_events::{BroadcastTaskEvents, DEFAULT_EVENT_CAPACITY};
