//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority level.
    pub priority: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Display sequence value.
    pub sort_order: i64,
}

/// Insert/update model for task records.
///
/// `treat_none_as_null` keeps the cleared completion timestamp writable:
/// an upsert with `completed_at: None` must null the column, not skip it.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct UpsertTaskRow {
    /// Task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority level.
    pub priority: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Display sequence value.
    pub sort_order: i64,
}
