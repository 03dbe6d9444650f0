//! Query predicate selecting the tasks a view should show.
//!
//! The filter combines an ownership clause with an optional "not checked"
//! clause. It can be evaluated in-process ([`TaskFilter::matches`]), rendered
//! as a document-store query ([`TaskFilter::to_query_document`]) or
//! destructured by SQL adapters through its accessors.
//!
//! A filter without an owner places no ownership constraint at all. Callers
//! serving an anonymous viewer must not run such a filter; the task service
//! short-circuits to an empty result instead.

use serde_json::{Map, Value, json};

use super::{HideCompleted, Task, UserId};

/// Ownership plus optional completion predicate.
///
/// # Examples
/// ```
/// use todo_backend::domain::{HideCompleted, TaskFilter, UserId};
/// use serde_json::json;
///
/// let owner = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// let filter = TaskFilter::for_view(Some(owner), HideCompleted::from(true));
/// assert_eq!(
///     filter.to_query_document(),
///     json!({
///         "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
///         "isChecked": { "$ne": true }
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    owner: Option<UserId>,
    hide_completed: bool,
}

impl TaskFilter {
    /// Filter backing the task list of a view.
    pub fn for_view(owner: Option<UserId>, hide_completed: HideCompleted) -> Self {
        Self {
            owner,
            hide_completed: hide_completed.is_enabled(),
        }
    }

    /// The pending filter: owned tasks that are not checked.
    pub fn pending(owner: Option<UserId>) -> Self {
        Self {
            owner,
            hide_completed: true,
        }
    }

    /// Owner constraint, if any.
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    /// Whether checked tasks are excluded.
    pub fn hide_completed(&self) -> bool {
        self.hide_completed
    }

    /// Evaluate the predicate against a task.
    pub fn matches(&self, task: &Task) -> bool {
        let owned = self.owner.as_ref().is_none_or(|owner| task.is_owned_by(owner));
        let visible = !self.hide_completed || !task.is_checked();
        owned && visible
    }

    /// Render the predicate as `{ userId?: ID, isChecked?: { $ne: true } }`.
    pub fn to_query_document(&self) -> Value {
        let mut query = Map::new();
        if let Some(owner) = &self.owner {
            query.insert("userId".to_owned(), Value::String(owner.to_string()));
        }
        if self.hide_completed {
            query.insert("isChecked".to_owned(), json!({ "$ne": true }));
        }
        Value::Object(query)
    }
}
