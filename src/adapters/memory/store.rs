//! Thread-safe in-memory task store.

use crate::domain::{Task, TaskId};
use crate::ports::{TaskStore, TaskStoreError, TaskStoreResult};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Ephemeral task store holding the collection behind a read-write lock.
///
/// Suitable for unit testing and short-lived sessions; nothing survives
/// the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given collection.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            state: Arc::new(RwLock::new(tasks)),
        }
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskStoreError {
    TaskStoreError::transport(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn load(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.clone())
    }

    async fn save_all(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        *state = tasks.to_vec();
        Ok(())
    }

    async fn next_id(&self) -> TaskStoreResult<TaskId> {
        let state = self.state.read().map_err(lock_error)?;
        let max_id = state.iter().map(|task| task.id().value()).max();
        Ok(TaskId::new(max_id.unwrap_or(0) + 1))
    }
}
