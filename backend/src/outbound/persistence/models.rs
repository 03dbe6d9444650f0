//! Diesel row structs for the `tasks` table.
//!
//! These never leave the persistence layer; conversion to domain types goes
//! through the validated constructors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::tasks;

/// Row read from the tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub is_checked: bool,
}

/// Insert payload; `is_checked` is left to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTaskRow<'a> {
    pub id: Uuid,
    pub text: &'a str,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}
