//! View-level values derived from a task list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of unchecked tasks owned by the viewer.
///
/// Displays as an empty string when zero and as `"(n)"` otherwise, ready to
/// append to a heading.
///
/// # Examples
/// ```
/// use todo_backend::domain::IncompleteCount;
///
/// assert_eq!(IncompleteCount::new(0).to_string(), "");
/// assert_eq!(IncompleteCount::new(3).to_string(), "(3)");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncompleteCount(u64);

impl IncompleteCount {
    /// Wrap a raw count.
    pub const fn new(count: u64) -> Self {
        Self(count)
    }

    /// Raw count.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Formatted label, identical to the `Display` output.
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl From<u64> for IncompleteCount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for IncompleteCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => Ok(()),
            n => write!(f, "({n})"),
        }
    }
}

/// Per-view "hide completed" flag. Defaults to off.
///
/// # Examples
/// ```
/// use todo_backend::domain::HideCompleted;
///
/// let flag = HideCompleted::default();
/// assert_eq!(flag.toggled().toggled(), flag);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HideCompleted(bool);

impl HideCompleted {
    /// Whether completed tasks are hidden.
    pub const fn is_enabled(self) -> bool {
        self.0
    }

    /// The flag with its value flipped.
    #[must_use]
    pub const fn toggled(self) -> Self {
        Self(!self.0)
    }
}

impl From<bool> for HideCompleted {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<HideCompleted> for bool {
    fn from(value: HideCompleted) -> Self {
        value.0
    }
}
