//! Submission form for new tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NewTask, TaskText, TaskValidationError, UserId};

/// Input state of the "new task" form.
///
/// A successful [`TaskForm::take_submission`] consumes the text and leaves
/// the field empty, ready for the next entry. A rejected submission keeps the
/// text so the caller can correct it.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use todo_backend::domain::{TaskForm, UserId};
///
/// let mut form = TaskForm::new("Buy milk");
/// let draft = form.take_submission(UserId::random(), Utc::now()).unwrap();
/// assert_eq!(draft.text.as_ref(), "Buy milk");
/// assert!(form.text().is_empty());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    text: String,
}

impl TaskForm {
    /// Form holding `text` as typed.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Current field contents.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Validate the field into a draft owned by `owner` and clear it.
    pub fn take_submission(
        &mut self,
        owner: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<NewTask, TaskValidationError> {
        let text = TaskText::new(&self.text)?;
        self.text.clear();
        Ok(NewTask {
            text,
            owner,
            created_at,
        })
    }
}
