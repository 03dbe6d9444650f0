//! Diesel table definitions for the task store.
//!
//! Kept in step with `backend/migrations` by hand.

diesel::table! {
    /// To-do items, one row per task.
    tasks (id) {
        /// Primary key assigned by the application (UUID v4).
        id -> Uuid,
        /// Task text, trimmed and at most 280 characters.
        text -> Text,
        /// Owning user.
        user_id -> Uuid,
        /// Creation time from the service clock; the list is ordered by it.
        created_at -> Timestamptz,
        /// Completion flag, false on insert.
        is_checked -> Bool,
    }
}
