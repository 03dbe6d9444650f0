//! Wire-level frames pushed to change-feed subscribers.
//!
//! Frames only name the task that changed; clients refetch the list and the
//! counter over HTTP.

use serde::{Deserialize, Serialize};

use crate::domain::{TaskEvent, TaskEventKind, TaskId};

/// Frame discriminator, serialised as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskFeedMessageType {
    TaskCreated,
    TaskCheckedChanged,
    TaskDeleted,
}

impl From<TaskEventKind> for TaskFeedMessageType {
    fn from(value: TaskEventKind) -> Self {
        match value {
            TaskEventKind::Created => Self::TaskCreated,
            TaskEventKind::CheckedChanged => Self::TaskCheckedChanged,
            TaskEventKind::Deleted => Self::TaskDeleted,
        }
    }
}

/// Outbound frame, e.g. `{"type":"taskCreated","taskId":"…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFeedMessage {
    /// Kind of change.
    #[serde(rename = "type")]
    pub kind: TaskFeedMessageType,
    /// Affected task.
    pub task_id: TaskId,
}

impl From<&TaskEvent> for TaskFeedMessage {
    fn from(value: &TaskEvent) -> Self {
        Self {
            kind: value.kind.into(),
            task_id: value.task_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    #[rstest]
    #[case(TaskEvent::created(UserId::random(), TaskId::from_uuid(Uuid::nil())), "taskCreated")]
    #[case(
        TaskEvent::checked_changed(UserId::random(), TaskId::from_uuid(Uuid::nil())),
        "taskCheckedChanged"
    )]
    #[case(TaskEvent::deleted(UserId::random(), TaskId::from_uuid(Uuid::nil())), "taskDeleted")]
    fn serialises_event_kinds(#[case] event: TaskEvent, #[case] expected_type: &str) {
        let frame = serde_json::to_value(TaskFeedMessage::from(&event)).expect("serialise");
        assert_eq!(
            frame,
            json!({ "type": expected_type, "taskId": Uuid::nil().to_string() })
        );
    }
}
