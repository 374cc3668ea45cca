//! Store port for durable task collection persistence.

use crate::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Persistence contract shared by every storage strategy.
///
/// The store owns the durable representation of the collection and the
/// assignment of task identity. Implementations may return records in any
/// order from [`load`](Self::load); callers sort by order value.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Reads the full task collection from durable storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when the underlying storage
    /// cannot be reached or its contents cannot be decoded.
    async fn load(&self) -> TaskStoreResult<Vec<Task>>;

    /// Persists the given collection as the new durable state.
    ///
    /// Records absent from `tasks` are removed from storage. Batch
    /// application is not guaranteed atomic; implementations report
    /// [`TaskStoreError::PartialBatch`] when only some records landed, and
    /// callers must then resynchronize via [`load`](Self::load) rather
    /// than trust local state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] on total failure or
    /// [`TaskStoreError::PartialBatch`] on partial application.
    async fn save_all(&self, tasks: &[Task]) -> TaskStoreResult<()>;

    /// Returns the identity the next created task will receive.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Transport`] when current state cannot be
    /// inspected.
    async fn next_id(&self) -> TaskStoreResult<TaskId>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// Storage I/O failure.
    #[error("storage transport failure: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// A batch mutation landed for some records and failed for others.
    #[error("partial batch failure: {applied} of {attempted} records persisted: {source}")]
    PartialBatch {
        /// Number of records successfully persisted.
        applied: usize,
        /// Number of records in the batch.
        attempted: usize,
        /// First underlying failure.
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl TaskStoreError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
