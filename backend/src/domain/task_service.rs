//! Task list domain service.
//!
//! Implements the task driving ports on top of a [`TaskRepository`] and a
//! [`TaskEventPublisher`]. Anonymous viewers never reach the repository: an
//! ownerless filter would match every user's tasks, so reads short-circuit to
//! empty results and writes are rejected.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    TaskCommand, TaskEventPublisher, TaskQuery, TaskRepository, TaskRepositoryError,
};
use crate::domain::{
    Error, HideCompleted, IncompleteCount, Task, TaskEvent, TaskFilter, TaskForm, TaskId, UserId,
    sort_newest_first,
};

fn map_repository_error(error: TaskRepositoryError) -> Error {
    match error {
        TaskRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("task store unavailable: {message}"))
        }
        TaskRepositoryError::Query { message } => {
            Error::internal(format!("task store error: {message}"))
        }
    }
}

fn require_viewer(viewer: Option<&UserId>) -> Result<&UserId, Error> {
    viewer.ok_or_else(|| Error::unauthorized("login required"))
}

fn task_not_found(task_id: TaskId) -> Error {
    Error::not_found(format!("task {task_id} not found"))
}

/// Task service implementing [`TaskQuery`] and [`TaskCommand`].
#[derive(Clone)]
pub struct TaskService<R, P> {
    tasks: Arc<R>,
    events: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<R, P> TaskService<R, P> {
    /// Create a service over a task store and an event sink.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use todo_backend::domain::TaskService;
    /// # use todo_backend::domain::ports::{FixtureTaskRepository, NoOpTaskEvents};
    /// let service = TaskService::new(
    ///     Arc::new(FixtureTaskRepository),
    ///     Arc::new(NoOpTaskEvents),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(tasks: Arc<R>, events: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks,
            events,
            clock,
        }
    }
}

#[async_trait]
impl<R, P> TaskQuery for TaskService<R, P>
where
    R: TaskRepository,
    P: TaskEventPublisher,
{
    async fn list_tasks(
        &self,
        viewer: Option<&UserId>,
        hide_completed: HideCompleted,
    ) -> Result<Vec<Task>, Error> {
        let Some(viewer) = viewer else {
            return Ok(Vec::new());
        };

        let filter = TaskFilter::for_view(Some(viewer.clone()), hide_completed);
        debug!(query = %filter.to_query_document(), "listing tasks");
        let mut tasks = self
            .tasks
            .find(&filter)
            .await
            .map_err(map_repository_error)?;
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn incomplete_count(&self, viewer: Option<&UserId>) -> Result<IncompleteCount, Error> {
        let Some(viewer) = viewer else {
            return Ok(IncompleteCount::default());
        };

        let filter = TaskFilter::pending(Some(viewer.clone()));
        let count = self
            .tasks
            .count(&filter)
            .await
            .map_err(map_repository_error)?;
        Ok(IncompleteCount::new(count))
    }
}

#[async_trait]
impl<R, P> TaskCommand for TaskService<R, P>
where
    R: TaskRepository,
    P: TaskEventPublisher,
{
    async fn create_task(
        &self,
        viewer: Option<&UserId>,
        form: &mut TaskForm,
    ) -> Result<Task, Error> {
        let viewer = require_viewer(viewer)?;
        let draft = form.take_submission(viewer.clone(), self.clock.utc())?;

        let task = self
            .tasks
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        debug!(task_id = %task.id(), owner = %viewer, "task created");
        self.events
            .publish(TaskEvent::created(viewer.clone(), task.id()));
        Ok(task)
    }

    async fn set_checked(
        &self,
        viewer: Option<&UserId>,
        task_id: TaskId,
        checked: bool,
    ) -> Result<Task, Error> {
        let viewer = require_viewer(viewer)?;
        let task = self
            .tasks
            .set_checked(viewer, &task_id, checked)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| task_not_found(task_id))?;

        self.events
            .publish(TaskEvent::checked_changed(viewer.clone(), task_id));
        Ok(task)
    }

    async fn delete_task(&self, viewer: Option<&UserId>, task_id: TaskId) -> Result<(), Error> {
        let viewer = require_viewer(viewer)?;
        let removed = self
            .tasks
            .delete(viewer, &task_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(task_not_found(task_id));
        }

        self.events
            .publish(TaskEvent::deleted(viewer.clone(), task_id));
        Ok(())
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
