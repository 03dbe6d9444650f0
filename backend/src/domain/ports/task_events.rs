//! Ports for publishing and subscribing to task change events.

use futures_util::stream::{self, BoxStream, StreamExt};

use crate::domain::TaskEvent;

/// Stream of events handed to a single subscriber.
pub type TaskEventStream = BoxStream<'static, TaskEvent>;

/// Driven port: the service announces successful mutations here.
///
/// Publishing is fire-and-forget; having no subscribers is not an error.
#[cfg_attr(test, mockall::automock)]
pub trait TaskEventPublisher: Send + Sync {
    fn publish(&self, event: TaskEvent);
}

/// Driving port: inbound adapters obtain a change feed here.
///
/// The stream yields every event published after the call; filtering by
/// owner is the subscriber's job.
pub trait TaskEventSubscription: Send + Sync {
    fn subscribe(&self) -> TaskEventStream;
}

/// Event sink that drops everything and a feed that never yields.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpTaskEvents;

impl TaskEventPublisher for NoOpTaskEvents {
    fn publish(&self, _event: TaskEvent) {}
}

impl TaskEventSubscription for NoOpTaskEvents {
    fn subscribe(&self) -> TaskEventStream {
        stream::pending().boxed()
    }
}
