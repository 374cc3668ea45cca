//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::adapters::memory::InMemoryTaskStore;
use taskflow::domain::{NewTask, TaskTitle};
use taskflow::services::TaskRepository;

/// Repository type used by the in-memory suites.
pub type MemRepository = TaskRepository<InMemoryTaskStore, DefaultClock>;

/// Provides a fresh repository over an empty in-memory store.
#[fixture]
pub fn repository() -> MemRepository {
    TaskRepository::new(Arc::new(InMemoryTaskStore::new()), Arc::new(DefaultClock))
}

/// Builds a creation draft with the given title.
pub fn draft(title: &str) -> NewTask {
    NewTask::new(TaskTitle::new(title).expect("valid title"))
}
