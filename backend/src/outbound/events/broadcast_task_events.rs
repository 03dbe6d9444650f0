//! Task change feed over a `tokio::sync::broadcast` channel.
//!
//! One adapter instance serves as both the publisher the service writes to
//! and the subscription the WebSocket adapter reads from. Receivers that fall
//! behind skip the missed events and carry on.

use futures_util::stream::{self, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{trace, warn};

use crate::domain::TaskEvent;
use crate::domain::ports::{TaskEventPublisher, TaskEventStream, TaskEventSubscription};

/// Default number of events buffered per receiver.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Broadcast-backed task event hub.
#[derive(Debug, Clone)]
pub struct BroadcastTaskEvents {
    sender: broadcast::Sender<TaskEvent>,
}

impl BroadcastTaskEvents {
    /// Create a hub buffering up to `capacity` events per receiver.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastTaskEvents {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl TaskEventPublisher for BroadcastTaskEvents {
    fn publish(&self, event: TaskEvent) {
        // An error only means nobody is listening right now.
        if self.sender.send(event).is_err() {
            trace!("task event dropped; no subscribers");
        }
    }
}

impl TaskEventSubscription for BroadcastTaskEvents {
    fn subscribe(&self) -> TaskEventStream {
        stream::unfold(self.sender.subscribe(), |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => return Some((event, receiver)),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "task event subscriber lagged; events skipped");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskEventKind, TaskId, UserId};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn subscribers_receive_events_published_after_subscribing() {
        let hub = BroadcastTaskEvents::new(4);
        let owner = UserId::random();
        hub.publish(TaskEvent::created(owner.clone(), TaskId::random()));

        let mut feed = hub.subscribe();
        let task_id = TaskId::random();
        hub.publish(TaskEvent::deleted(owner.clone(), task_id));

        let event = feed.next().await.expect("event delivered");
        assert_eq!(event.kind, TaskEventKind::Deleted);
        assert_eq!(event.task_id, task_id);
    }

    #[rstest]
    #[tokio::test]
    async fn lagging_subscriber_skips_to_latest() {
        let hub = BroadcastTaskEvents::new(1);
        let owner = UserId::random();
        let mut feed = hub.subscribe();
        let last = TaskId::random();
        hub.publish(TaskEvent::created(owner.clone(), TaskId::random()));
        hub.publish(TaskEvent::created(owner.clone(), TaskId::random()));
        hub.publish(TaskEvent::checked_changed(owner, last));

        let event = feed.next().await.expect("latest event delivered");
        assert_eq!(event.task_id, last);
    }

    #[rstest]
    fn publishing_without_subscribers_is_silent() {
        let hub = BroadcastTaskEvents::default();
        hub.publish(TaskEvent::created(UserId::random(), TaskId::random()));
        assert_eq!(hub.subscriber_count(), 0);
    }
}
