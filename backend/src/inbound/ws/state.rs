//! Shared WebSocket adapter state.
//!
//! The entry point depends on the subscription port only, so tests can feed
//! it from any event source.

use std::sync::Arc;

use crate::domain::ports::TaskEventSubscription;

/// Dependency bundle for the WebSocket entry point.
#[derive(Clone)]
pub struct WsState {
    /// Source of task change events.
    pub events: Arc<dyn TaskEventSubscription>,
}

impl WsState {
    /// Bundle the event source.
    pub fn new(events: Arc<dyn TaskEventSubscription>) -> Self {
        Self { events }
    }
}
