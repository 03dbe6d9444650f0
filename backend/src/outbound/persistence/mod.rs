//! PostgreSQL persistence adapters using Diesel.
//!
//! Adapters translate between Diesel rows and domain types and hold no task
//! rules of their own. Row structs (`models`) and table definitions
//! (`schema`) stay private to this module.
//!
//! ```ignore
//! use todo_backend::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/todo")).await?;
//! let tasks = DieselTaskRepository::new(pool);
//! ```

mod diesel_task_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
