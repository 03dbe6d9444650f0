//! Change notifications emitted after task mutations.

use serde::{Deserialize, Serialize};

use super::{TaskId, UserId};

/// What happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskEventKind {
    Created,
    CheckedChanged,
    Deleted,
}

/// A single mutation of one user's task list.
///
/// Subscribers use the event as a cue to refetch the list and counter; the
/// event itself carries only the identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEvent {
    /// Owner of the affected task; only they see the event.
    pub owner: UserId,
    /// What happened.
    pub kind: TaskEventKind,
    /// Affected task.
    pub task_id: TaskId,
}

impl TaskEvent {
    /// A task was added.
    pub fn created(owner: UserId, task_id: TaskId) -> Self {
        Self {
            owner,
            kind: TaskEventKind::Created,
            task_id,
        }
    }

    /// A task was checked or unchecked.
    pub fn checked_changed(owner: UserId, task_id: TaskId) -> Self {
        Self {
            owner,
            kind: TaskEventKind::CheckedChanged,
            task_id,
        }
    }

    /// A task was removed.
    pub fn deleted(owner: UserId, task_id: TaskId) -> Self {
        Self {
            owner,
            kind: TaskEventKind::Deleted,
            task_id,
        }
    }

    /// Whether the event belongs to `viewer`'s list.
    pub fn is_visible_to(&self, viewer: &UserId) -> bool {
        &self.owner == viewer
    }
}
