//! Typed CRUD and query façade over the task store.

use super::view::matches_query;
use crate::domain::{
    NewTask, Priority, Task, TaskDomainError, TaskFilter, TaskId, TaskPatch, TaskStatus,
    TaskTitle,
};
use crate::ports::{TaskStore, TaskStoreError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task repository operations.
#[derive(Debug, Error)]
pub enum TaskRepositoryError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task collection façade.
///
/// Owns the canonical in-memory representation handed to callers: every
/// read reflects durable state, and every mutation persists through the
/// store before returning. The repository normalizes order values, fills
/// creation defaults, and applies patch semantics; user-input validation
/// happens earlier, at [`TaskTitle`] construction.
#[derive(Clone)]
pub struct TaskRepository<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TaskRepository<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new repository over the given store and clock.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns all tasks, ascending by order value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the store cannot be
    /// read.
    pub async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let mut tasks = self.store.load().await?;
        sort_by_order(&mut tasks);
        Ok(tasks)
    }

    /// Returns the task with the given identifier.
    ///
    /// Absence is `Ok(None)`; only transport failures are errors.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the store cannot be
    /// read.
    pub async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.store.load().await?;
        Ok(tasks.into_iter().find(|task| task.id() == id))
    }

    /// Creates a task from the draft, filling creation defaults.
    ///
    /// Identity comes from the store; the order value is one past the
    /// current maximum (or `1` on an empty collection) unless the draft
    /// carries an explicit override.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when persistence fails.
    pub async fn create(&self, draft: NewTask) -> TaskRepositoryResult<Task> {
        let mut tasks = self.store.load().await?;
        let id = self.store.next_id().await?;
        let sort_order = draft
            .sort_order()
            .unwrap_or_else(|| next_sort_order(&tasks));

        let task = Task::create(id, sort_order, draft, &*self.clock);
        tasks.push(task.clone());
        self.store.save_all(&tasks).await?;
        tracing::debug!(id = %task.id(), "task created");
        Ok(task)
    }

    /// Applies a partial update to an existing task.
    ///
    /// Only fields present in the patch change; a completion-flag change
    /// derives the completion timestamp unless the patch overrides it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the id does not
    /// exist, or [`TaskRepositoryError::Store`] when persistence fails.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskRepositoryResult<Task> {
        let mut tasks = self.store.load().await?;
        let task = tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        task.apply(patch, &*self.clock);
        let updated = task.clone();
        self.store.save_all(&tasks).await?;
        Ok(updated)
    }

    /// Removes a task from the collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the id does not
    /// exist, or [`TaskRepositoryError::Store`] when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut tasks = self.store.load().await?;
        let before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == before {
            return Err(TaskRepositoryError::NotFound(id));
        }
        self.store.save_all(&tasks).await?;
        tracing::debug!(%id, "task deleted");
        Ok(())
    }

    /// Reassigns order values from the submitted id sequence.
    ///
    /// Each present id receives `position + 1` (0-based position within
    /// the sequence); ids absent from the collection are skipped, and
    /// tasks not named keep their order value. Returns the collection
    /// re-sorted by order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when persistence fails,
    /// including partial batch application.
    pub async fn update_order(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let mut tasks = self.store.load().await?;
        for (position, id) in ids.iter().enumerate() {
            if let Some(task) = tasks.iter_mut().find(|task| task.id() == *id) {
                let sort_order = i64::try_from(position).map_or(i64::MAX, |value| value + 1);
                task.set_sort_order(sort_order);
            }
        }
        self.store.save_all(&tasks).await?;
        sort_by_order(&mut tasks);
        Ok(tasks)
    }

    /// Returns tasks matching the given completion status, ordered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the store cannot be
    /// read.
    pub async fn get_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.get_filtered(TaskFilter::Status(status)).await
    }

    /// Returns tasks matching the given priority, ordered.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the store cannot be
    /// read.
    pub async fn get_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>> {
        self.get_filtered(TaskFilter::Priority(priority)).await
    }

    /// Returns tasks whose title or description contains the query,
    /// case-insensitively. Blank or whitespace-only queries behave
    /// exactly like [`get_all`](Self::get_all).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] when the store cannot be
    /// read.
    pub async fn search(&self, query: &str) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.get_all().await?;
        if query.trim().is_empty() {
            return Ok(tasks);
        }
        Ok(tasks
            .into_iter()
            .filter(|task| matches_query(task, query))
            .collect())
    }

    /// Creates a copy of an existing task.
    ///
    /// The copy takes the source's description and priority under a
    /// `Copy of …` title, with fresh identity, order, and timestamps, and
    /// starts pending.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the source does not
    /// exist, or [`TaskRepositoryError::Store`] when persistence fails.
    pub async fn duplicate(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let source = self
            .get_by_id(id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;
        let title = TaskTitle::new(format!("Copy of {}", source.title()))?;
        let draft = NewTask::new(title)
            .with_description(source.description())
            .with_priority(source.priority());
        self.create(draft).await
    }

    async fn get_filtered(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.get_all().await?;
        Ok(tasks.into_iter().filter(|task| filter.matches(task)).collect())
    }
}

/// Sorts the collection ascending by order value; the sort is stable, so
/// insertion order breaks ties.
fn sort_by_order(tasks: &mut [Task]) {
    tasks.sort_by_key(Task::sort_order);
}

/// Returns the order value a newly created task receives.
fn next_sort_order(tasks: &[Task]) -> i64 {
    tasks.iter().map(Task::sort_order).max().map_or(1, |max| max + 1)
}
