//! Driving port for reading a viewer's task list.
//!
//! Inbound adapters pass the viewer as an `Option`: anonymous callers are a
//! normal case here and receive an empty list and an empty counter.

use async_trait::async_trait;

use crate::domain::{Error, HideCompleted, IncompleteCount, Task, UserId};

/// Read-side use-cases for the task list.
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// The viewer's tasks, newest first, honouring `hide_completed`.
    async fn list_tasks(
        &self,
        viewer: Option<&UserId>,
        hide_completed: HideCompleted,
    ) -> Result<Vec<Task>, Error>;

    /// Number of the viewer's unchecked tasks.
    async fn incomplete_count(&self, viewer: Option<&UserId>) -> Result<IncompleteCount, Error>;
}

/// Query double that always reports an empty list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTaskQuery;

#[async_trait]
impl TaskQuery for FixtureTaskQuery {
    async fn list_tasks(
        &self,
        _viewer: Option<&UserId>,
        _hide_completed: HideCompleted,
    ) -> Result<Vec<Task>, Error> {
        Ok(Vec::new())
    }

    async fn incomplete_count(&self, _viewer: Option<&UserId>) -> Result<IncompleteCount, Error> {
        Ok(IncompleteCount::default())
    }
}
