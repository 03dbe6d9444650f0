//! Domain types, services and ports for the task list.
//!
//! Purpose: keep the task rules (ownership, filtering, ordering, counting)
//! independent of HTTP, WebSocket and storage concerns. Inbound adapters call
//! the driving ports in [`ports`]; outbound adapters implement the driven
//! ones.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `Task`, `TaskText`, `TaskId`, `NewTask`: the task entity.
//! - `TaskFilter`, `IncompleteCount`, `HideCompleted`, `TaskForm`: view logic.
//! - `TaskService`: implementation of the task driving ports.

pub mod auth;
pub mod error;
pub mod ports;
pub mod task;
pub mod task_events;
pub mod task_filter;
pub mod task_form;
pub mod task_list;
pub mod task_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::task::{
    NewTask, TASK_TEXT_MAX, Task, TaskId, TaskText, TaskValidationError, sort_newest_first,
};
pub use self::task_events::{TaskEvent, TaskEventKind};
pub use self::task_filter::TaskFilter;
pub use self::task_form::TaskForm;
pub use self::task_list::{HideCompleted, IncompleteCount};
pub use self::task_service::TaskService;
pub use self::trace_id::TraceId;
pub use self::user::{User, UserId, UserValidationError, Username};
