//! Driving port for task mutations.

use async_trait::async_trait;

use crate::domain::{Error, Task, TaskForm, TaskId, UserId};

/// Write-side use-cases for the task list.
///
/// Every operation requires a viewer; `None` yields
/// [`crate::domain::ErrorCode::Unauthorized`]. Tasks that are missing or
/// owned by someone else are reported as
/// [`crate::domain::ErrorCode::NotFound`] so ownership is not disclosed.
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Submit the form as a new task, clearing it on success.
    async fn create_task(&self, viewer: Option<&UserId>, form: &mut TaskForm)
    -> Result<Task, Error>;

    /// Set the completion flag of one of the viewer's tasks.
    async fn set_checked(
        &self,
        viewer: Option<&UserId>,
        task_id: TaskId,
        checked: bool,
    ) -> Result<Task, Error>;

    /// Delete one of the viewer's tasks.
    async fn delete_task(&self, viewer: Option<&UserId>, task_id: TaskId) -> Result<(), Error>;
}

/// Command double that rejects every mutation as unauthenticated.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTaskCommand;

#[async_trait]
impl TaskCommand for FixtureTaskCommand {
    async fn create_task(
        &self,
        _viewer: Option<&UserId>,
        _form: &mut TaskForm,
    ) -> Result<Task, Error> {
        Err(Error::unauthorized("login required"))
    }

    async fn set_checked(
        &self,
        _viewer: Option<&UserId>,
        _task_id: TaskId,
        _checked: bool,
    ) -> Result<Task, Error> {
        Err(Error::unauthorized("login required"))
    }

    async fn delete_task(&self, _viewer: Option<&UserId>, _task_id: TaskId) -> Result<(), Error> {
        Err(Error::unauthorized("login required"))
    }
}
