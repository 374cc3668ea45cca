//! `PostgreSQL` store implementation for the task collection.

use super::{
    models::{TaskRow, UpsertTaskRow},
    schema::tasks,
};
use crate::domain::{PersistedTaskData, Priority, Task, TaskId, TaskTitle};
use crate::ports::{TaskStore, TaskStoreError, TaskStoreResult};
use async_trait::async_trait;
use diesel::dsl::max;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by the task store.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
///
/// Maps the store contract onto the record table: ordered projected reads
/// for [`load`](TaskStore::load), a per-record upsert batch plus
/// delete-of-absent-ids for [`save_all`](TaskStore::save_all). Batch
/// application is intentionally not wrapped in one transaction; records
/// land independently and partial application is reported as
/// [`TaskStoreError::PartialBatch`].
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::transport)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::transport)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn load(&self) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::sort_order.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::transport)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn save_all(&self, items: &[Task]) -> TaskStoreResult<()> {
        let rows: Vec<UpsertTaskRow> = items.iter().map(task_to_row).collect();
        let keep_ids: Vec<i64> = items.iter().map(|task| task.id().value()).collect();

        self.run_blocking(move |connection| {
            let attempted = rows.len();
            let mut applied = 0_usize;
            let mut first_error: Option<DieselError> = None;

            for row in rows {
                let result = diesel::insert_into(tasks::table)
                    .values(&row)
                    .on_conflict(tasks::id)
                    .do_update()
                    .set(&row)
                    .execute(connection);
                match result {
                    Ok(_) => applied += 1,
                    Err(err) => {
                        if first_error.is_none() {
                            first_error = Some(err);
                        }
                    }
                }
            }

            if let Some(err) = first_error {
                if applied == 0 {
                    return Err(TaskStoreError::transport(err));
                }
                tracing::warn!(applied, attempted, "task batch applied partially");
                return Err(TaskStoreError::PartialBatch {
                    applied,
                    attempted,
                    source: Arc::new(err),
                });
            }

            diesel::delete(tasks::table.filter(tasks::id.ne_all(keep_ids)))
                .execute(connection)
                .map_err(TaskStoreError::transport)?;
            Ok(())
        })
        .await
    }

    async fn next_id(&self) -> TaskStoreResult<TaskId> {
        self.run_blocking(|connection| {
            let max_id: Option<i64> = tasks::table
                .select(max(tasks::id))
                .first(connection)
                .map_err(TaskStoreError::transport)?;
            Ok(TaskId::new(max_id.unwrap_or(0) + 1))
        })
        .await
    }
}

pub(crate) fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title: raw_title,
        description,
        priority: raw_priority,
        completed,
        created_at,
        completed_at,
        sort_order,
    } = row;

    let title = TaskTitle::new(raw_title).map_err(TaskStoreError::transport)?;
    let priority =
        Priority::try_from(raw_priority.as_str()).map_err(TaskStoreError::transport)?;

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

pub(crate) fn task_to_row(task: &Task) -> UpsertTaskRow {
    UpsertTaskRow {
        id: task.id().value(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        priority: task.priority().as_str().to_owned(),
        completed: task.completed(),
        created_at: task.created_at(),
        completed_at: task.completed_at(),
        sort_order: task.sort_order(),
    }
}
