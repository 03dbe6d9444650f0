//! In-process adapters used for development and as defaults when no external
//! store is configured.

mod in_memory_accounts;
mod in_memory_task_repository;

pub use in_memory_accounts::{InMemoryAccounts, account_user_id};
pub use in_memory_task_repository::InMemoryTaskRepository;
