//! JSON-blob task store backed by a capability-scoped directory.

use crate::domain::{PersistedTaskData, Priority, Task, TaskId, TaskTitle};
use crate::ports::{TaskStore, TaskStoreError, TaskStoreResult};
use async_trait::async_trait;
use cap_std::fs_utf8::Dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Dataset used when the storage slot has never been written.
const DEFAULT_DATASET: &str = include_str!("default_tasks.json");

/// Local-durable task store.
///
/// The whole collection is serialized as one JSON blob under a fixed
/// storage key inside the given directory; every mutation rewrites the
/// blob. When the slot is empty, [`load`](TaskStore::load) falls back to a
/// bundled default dataset.
#[derive(Debug, Clone)]
pub struct JsonFileTaskStore {
    dir: Arc<Dir>,
}

/// Serialized task record.
///
/// Reads tolerate the duplicated legacy field naming
/// (`title_c`/`completed_c`/`order_c`, …) that older clients persisted;
/// writes always emit the canonical names, collapsing the dual naming at
/// this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTask {
    #[serde(alias = "Id")]
    id: i64,
    #[serde(alias = "title_c")]
    title: String,
    #[serde(default, alias = "description_c")]
    description: String,
    #[serde(default, alias = "priority_c")]
    priority: Priority,
    #[serde(default, alias = "completed_c")]
    completed: bool,
    #[serde(alias = "created_at_c", alias = "createdAt")]
    created_at: DateTime<Utc>,
    #[serde(default, alias = "completed_at_c", alias = "completedAt")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(alias = "order_c", alias = "order")]
    sort_order: i64,
}

impl StoredTask {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            priority: task.priority(),
            completed: task.completed(),
            created_at: task.created_at(),
            completed_at: task.completed_at(),
            sort_order: task.sort_order(),
        }
    }

    fn into_task(self) -> TaskStoreResult<Task> {
        let Self {
            id,
            title: raw_title,
            description,
            priority,
            completed,
            created_at,
            completed_at,
            sort_order,
        } = self;
        let title = TaskTitle::new(raw_title).map_err(TaskStoreError::transport)?;
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::new(id),
            title,
            description,
            priority,
            completed,
            created_at,
            completed_at,
            sort_order,
        }))
    }
}

impl JsonFileTaskStore {
    /// Storage key the collection blob is kept under.
    pub const STORAGE_KEY: &'static str = "taskflow.tasks.json";

    /// Creates a store persisting into the given directory.
    #[must_use]
    pub fn new(dir: Dir) -> Self {
        Self { dir: Arc::new(dir) }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&Dir) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(TaskStoreError::transport)?
    }

    fn read_blob(dir: &Dir) -> TaskStoreResult<String> {
        match dir.read_to_string(Self::STORAGE_KEY) {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    key = Self::STORAGE_KEY,
                    "no stored collection, loading bundled default dataset"
                );
                Ok(DEFAULT_DATASET.to_owned())
            }
            Err(err) => Err(TaskStoreError::transport(err)),
        }
    }
}

#[async_trait]
impl TaskStore for JsonFileTaskStore {
    async fn load(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|dir| {
            let contents = Self::read_blob(dir)?;
            let records: Vec<StoredTask> =
                serde_json::from_str(&contents).map_err(TaskStoreError::transport)?;
            records.into_iter().map(StoredTask::into_task).collect()
        })
        .await
    }

    async fn save_all(&self, tasks: &[Task]) -> TaskStoreResult<()> {
        let records: Vec<StoredTask> = tasks.iter().map(StoredTask::from_task).collect();
        self.run_blocking(move |dir| {
            let blob =
                serde_json::to_string_pretty(&records).map_err(TaskStoreError::transport)?;
            dir.write(Self::STORAGE_KEY, blob)
                .map_err(TaskStoreError::transport)
        })
        .await
    }

    async fn next_id(&self) -> TaskStoreResult<TaskId> {
        let tasks = self.load().await?;
        let max_id = tasks.iter().map(|task| task.id().value()).max();
        Ok(TaskId::new(max_id.unwrap_or(0) + 1))
    }
}
