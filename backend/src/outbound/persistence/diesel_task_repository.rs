//! PostgreSQL-backed `TaskRepository` using Diesel.
//!
//! The [`TaskFilter`] is translated into a `WHERE` clause through its
//! accessors: the owner becomes `user_id = $1` and the completion clause
//! becomes `is_checked = false`. Ordering is `created_at DESC, id ASC`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{NewTask, Task, TaskFilter, TaskId, TaskText, UserId};

use super::models::{NewTaskRow, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Repository backed by `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskRepositoryError {
    TaskRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> TaskRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TaskRepositoryError::connection("database connection closed")
        }
        DieselError::NotFound => TaskRepositoryError::query("record not found"),
        _ => TaskRepositoryError::query("database error"),
    }
}

fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    let TaskRow {
        id,
        text,
        user_id,
        created_at,
        is_checked,
    } = row;
    let text = TaskText::new(text)
        .map_err(|err| TaskRepositoryError::query(format!("stored task {id}: {err}")))?;

    Ok(Task::new(
        TaskId::from_uuid(id),
        text,
        UserId::from_uuid(user_id),
        created_at,
        is_checked,
    ))
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, draft: &NewTask) -> Result<Task, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTaskRow {
            id: *TaskId::random().as_uuid(),
            text: draft.text.as_ref(),
            user_id: *draft.owner.as_uuid(),
            created_at: draft.created_at,
        };

        let stored = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(TaskRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_task(stored)
    }

    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = tasks::table
            .select(TaskRow::as_select())
            .order_by((tasks::created_at.desc(), tasks::id.asc()))
            .into_boxed();
        if let Some(owner) = filter.owner() {
            query = query.filter(tasks::user_id.eq(*owner.as_uuid()));
        }
        if filter.hide_completed() {
            query = query.filter(tasks::is_checked.eq(false));
        }

        let rows: Vec<TaskRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_task).collect()
    }

    async fn count(&self, filter: &TaskFilter) -> Result<u64, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = tasks::table
            .select(diesel::dsl::count_star())
            .into_boxed();
        if let Some(owner) = filter.owner() {
            query = query.filter(tasks::user_id.eq(*owner.as_uuid()));
        }
        if filter.hide_completed() {
            query = query.filter(tasks::is_checked.eq(false));
        }

        let count: i64 = query
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|_| TaskRepositoryError::query("negative row count"))
    }

    async fn set_checked(
        &self,
        owner: &UserId,
        task_id: &TaskId,
        checked: bool,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            tasks::table
                .filter(tasks::id.eq(*task_id.as_uuid()))
                .filter(tasks::user_id.eq(*owner.as_uuid())),
        )
        .set(tasks::is_checked.eq(checked))
        .returning(TaskRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        updated.map(row_to_task).transpose()
    }

    async fn delete(&self, owner: &UserId, task_id: &TaskId) -> Result<bool, TaskRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            tasks::table
                .filter(tasks::id.eq(*task_id.as_uuid()))
                .filter(tasks::user_id.eq(*owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }
}
