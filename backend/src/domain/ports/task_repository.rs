//! Port for task persistence.
//!
//! The contract follows a document-store shape: insert a draft, find or count
//! by [`TaskFilter`], and owner-scoped mutations that report whether a row
//! was touched. Mutations never affect tasks owned by someone else.

use async_trait::async_trait;

use crate::domain::{NewTask, Task, TaskFilter, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "task repository connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } =>
            "task repository query failed: {message}",
    }
}

/// Port for reading and writing tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a draft as an unchecked task and return it with its new id.
    async fn insert(&self, draft: &NewTask) -> Result<Task, TaskRepositoryError>;

    /// Tasks matching `filter`, newest first.
    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Number of tasks matching `filter`.
    async fn count(&self, filter: &TaskFilter) -> Result<u64, TaskRepositoryError>;

    /// Set the completion flag of `owner`'s task. `None` when no such task.
    async fn set_checked(
        &self,
        owner: &UserId,
        task_id: &TaskId,
        checked: bool,
    ) -> Result<Option<Task>, TaskRepositoryError>;

    /// Remove `owner`'s task. `false` when no such task.
    async fn delete(&self, owner: &UserId, task_id: &TaskId) -> Result<bool, TaskRepositoryError>;
}

/// Repository that stores nothing, for wiring that never reaches the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTaskRepository;

#[async_trait]
impl TaskRepository for FixtureTaskRepository {
    async fn insert(&self, draft: &NewTask) -> Result<Task, TaskRepositoryError> {
        Ok(Task::from_new(TaskId::random(), draft.clone()))
    }

    async fn find(&self, _filter: &TaskFilter) -> Result<Vec<Task>, TaskRepositoryError> {
        Ok(Vec::new())
    }

    async fn count(&self, _filter: &TaskFilter) -> Result<u64, TaskRepositoryError> {
        Ok(0)
    }

    async fn set_checked(
        &self,
        _owner: &UserId,
        _task_id: &TaskId,
        _checked: bool,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _owner: &UserId, _task_id: &TaskId) -> Result<bool, TaskRepositoryError> {
        Ok(false)
    }
}
