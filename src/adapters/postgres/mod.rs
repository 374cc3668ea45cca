//! `PostgreSQL` adapter for task collection persistence.

mod models;
mod schema;
mod store;

pub use store::{PostgresTaskStore, TaskPgPool};
