//! Port contracts for the task collection.

mod store;

pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
