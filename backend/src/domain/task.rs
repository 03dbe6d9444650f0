//! Task entity and its validated parts.
//!
//! A task is a short to-do item owned by exactly one user. Tasks are created
//! unchecked, toggled by their owner, and removed by their owner; nothing else
//! mutates them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Error, UserId};

/// Maximum number of characters accepted in a task's text.
pub const TASK_TEXT_MAX: usize = 280;

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskValidationError {
    /// Text is blank once trimmed.
    #[error("task text must not be empty")]
    EmptyText,
    /// Text exceeds the character limit.
    #[error("task text must be at most {max} characters")]
    TextTooLong {
        /// Maximum permitted length in characters.
        max: usize,
    },
    /// Identifier is not a UUID.
    #[error("task id must be a valid UUID")]
    InvalidId,
}

impl From<TaskValidationError> for Error {
    fn from(value: TaskValidationError) -> Self {
        let field = match value {
            TaskValidationError::InvalidId => "id",
            _ => "text",
        };
        Error::invalid_request(value.to_string())
            .with_details(serde_json::json!({ "field": field }))
    }
}

/// Stable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a textual identifier such as a path segment.
    pub fn parse(raw: &str) -> Result<Self, TaskValidationError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| TaskValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Text of a task.
///
/// ## Invariants
/// - Non-empty once trimmed; stored trimmed.
/// - At most [`TASK_TEXT_MAX`] characters.
///
/// # Examples
/// ```
/// use todo_backend::domain::TaskText;
///
/// assert_eq!(TaskText::new("  Buy milk ").unwrap().as_ref(), "Buy milk");
/// assert!(TaskText::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskText(String);

impl TaskText {
    /// Trim and validate task text.
    pub fn new(text: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        if trimmed.chars().count() > TASK_TEXT_MAX {
            return Err(TaskValidationError::TextTooLong {
                max: TASK_TEXT_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TaskText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TaskText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TaskText> for String {
    fn from(value: TaskText) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskText {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated submission that has not been persisted yet.
///
/// Mirrors the insert payload `{ text, userId, createdAt }`; `isChecked` is
/// absent and therefore false once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Validated text.
    pub text: TaskText,
    /// Submitting user.
    pub owner: UserId,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Persisted to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: TaskText,
    user_id: UserId,
    created_at: DateTime<Utc>,
    is_checked: bool,
}

impl Task {
    /// Reassemble a task from stored parts.
    pub fn new(
        id: TaskId,
        text: TaskText,
        owner: UserId,
        created_at: DateTime<Utc>,
        is_checked: bool,
    ) -> Self {
        Self {
            id,
            text,
            user_id: owner,
            created_at,
            is_checked,
        }
    }

    /// Materialise a draft under a freshly assigned id, unchecked.
    pub fn from_new(id: TaskId, draft: NewTask) -> Self {
        let NewTask {
            text,
            owner,
            created_at,
        } = draft;
        Self::new(id, text, owner, created_at, false)
    }

    /// Stable identifier.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Task text.
    pub fn text(&self) -> &TaskText {
        &self.text
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.user_id
    }

    /// Creation time; lists sort on it, newest first.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the task is marked done.
    pub fn is_checked(&self) -> bool {
        self.is_checked
    }

    /// Whether `user` owns this task.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.user_id == user
    }

    /// Copy with the completion flag replaced.
    #[must_use]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.is_checked = checked;
        self
    }
}

/// Order tasks newest first.
///
/// Ties on `createdAt` fall back to the id so the order stays stable across
/// store implementations.
pub fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}
