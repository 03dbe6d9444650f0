//! Process-local `TaskRepository` used when no database is configured.
//!
//! Tasks live in a `Vec` behind a `std::sync::RwLock`; the lock is never held
//! across an `.await`. Contents are lost on restart.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{TaskRepository, TaskRepositoryError};
use crate::domain::{NewTask, Task, TaskFilter, TaskId, UserId, sort_newest_first};

/// In-memory task store.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `tasks`.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks.into_iter().collect()),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::query("task store lock poisoned")
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, draft: &NewTask) -> Result<Task, TaskRepositoryError> {
        let task = Task::from_new(TaskId::random(), draft.clone());
        self.tasks.write().map_err(poisoned)?.push(task.clone());
        Ok(task)
    }

    async fn find(&self, filter: &TaskFilter) -> Result<Vec<Task>, TaskRepositoryError> {
        let mut found: Vec<Task> = self
            .tasks
            .read()
            .map_err(poisoned)?
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        Ok(found)
    }

    async fn count(&self, filter: &TaskFilter) -> Result<u64, TaskRepositoryError> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        let count = tasks.iter().filter(|task| filter.matches(task)).count();
        Ok(count as u64)
    }

    async fn set_checked(
        &self,
        owner: &UserId,
        task_id: &TaskId,
        checked: bool,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let Some(slot) = tasks
            .iter_mut()
            .find(|task| task.id() == *task_id && task.is_owned_by(owner))
        else {
            return Ok(None);
        };
        *slot = slot.clone().with_checked(checked);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, owner: &UserId, task_id: &TaskId) -> Result<bool, TaskRepositoryError> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let before = tasks.len();
        tasks.retain(|task| !(task.id() == *task_id && task.is_owned_by(owner)));
        Ok(tasks.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{HideCompleted, TaskText};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_750_000_000 + seconds, 0)
            .single()
            .expect("valid timestamp")
    }

    fn draft(owner: &UserId, text: &str, seconds: i64) -> NewTask {
        NewTask {
            text: TaskText::new(text).expect("valid text"),
            owner: owner.clone(),
            created_at: at(seconds),
        }
    }

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    #[rstest]
    #[tokio::test]
    async fn find_filters_by_owner_and_completion(owner: UserId) {
        let repo = InMemoryTaskRepository::new();
        let stranger = UserId::random();
        let done = repo.insert(&draft(&owner, "done", 1)).await.expect("insert");
        repo.insert(&draft(&owner, "open", 2)).await.expect("insert");
        repo.insert(&draft(&stranger, "theirs", 3)).await.expect("insert");
        repo.set_checked(&owner, &done.id(), true)
            .await
            .expect("toggle")
            .expect("own task exists");

        let visible = repo
            .find(&TaskFilter::for_view(Some(owner.clone()), HideCompleted::from(true)))
            .await
            .expect("find");
        let all_mine = repo
            .find(&TaskFilter::for_view(Some(owner.clone()), HideCompleted::default()))
            .await
            .expect("find");

        let texts = |tasks: &[Task]| -> Vec<String> {
            tasks.iter().map(|t| t.text().as_ref().to_owned()).collect()
        };
        assert_eq!(texts(&visible), vec!["open"]);
        assert_eq!(texts(&all_mine), vec!["open", "done"]);
        assert_eq!(
            repo.count(&TaskFilter::pending(Some(owner))).await.expect("count"),
            1
        );
    }

    #[rstest]
    #[tokio::test]
    async fn mutations_ignore_foreign_tasks(owner: UserId) {
        let repo = InMemoryTaskRepository::new();
        let task = repo.insert(&draft(&owner, "mine", 0)).await.expect("insert");
        let intruder = UserId::random();

        let toggled = repo
            .set_checked(&intruder, &task.id(), true)
            .await
            .expect("toggle");
        let removed = repo.delete(&intruder, &task.id()).await.expect("delete");

        assert!(toggled.is_none());
        assert!(!removed);
        assert_eq!(
            repo.count(&TaskFilter::pending(Some(owner))).await.expect("count"),
            1
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_owned_task(owner: UserId) {
        let repo = InMemoryTaskRepository::new();
        let task = repo.insert(&draft(&owner, "mine", 0)).await.expect("insert");

        assert!(repo.delete(&owner, &task.id()).await.expect("delete"));
        assert!(!repo.delete(&owner, &task.id()).await.expect("delete"));
    }
}
