//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod task_command;
mod task_events;
mod task_query;
mod task_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
pub use task_command::{FixtureTaskCommand, TaskCommand};
#[cfg(test)]
pub use task_events::MockTaskEventPublisher;
pub use task_events::{NoOpTaskEvents, TaskEventPublisher, TaskEventStream, TaskEventSubscription};
pub use task_query::{FixtureTaskQuery, TaskQuery};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{FixtureTaskRepository, TaskRepository, TaskRepositoryError};
