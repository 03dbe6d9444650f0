//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL task store via Diesel.
//! - **memory**: in-process task store and account directory.
//! - **events**: broadcast fan-out of task change events.
//!
//! Adapters translate between domain types and infrastructure
//! representations and contain no task rules.

pub mod events;
pub mod memory;
pub mod persistence;
