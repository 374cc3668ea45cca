//! Drag-to-reorder coordination with optimistic commit and rollback.

use super::repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
use crate::domain::{Task, TaskId};
use crate::ports::TaskStore;
use mockable::Clock;
use std::sync::Arc;

/// Drag interaction state.
///
/// One tagged value instead of independently settable flags, so illegal
/// combinations (a hover target without a drag source, a stale nesting
/// counter) are unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A task is being dragged, not currently over an eligible target.
    Dragging {
        /// The task being dragged.
        source: TaskId,
    },
    /// The dragged task hovers over another task.
    DraggingOver {
        /// The task being dragged.
        source: TaskId,
        /// The task currently hovered.
        target: TaskId,
        /// Hover nesting depth; leave events unwind it before the hover
        /// target clears.
        depth: u32,
    },
}

impl DragState {
    /// Returns the dragged task, if a drag is in progress.
    #[must_use]
    pub const fn source(&self) -> Option<TaskId> {
        match self {
            Self::Idle => None,
            Self::Dragging { source } | Self::DraggingOver { source, .. } => Some(*source),
        }
    }

    /// Returns the hovered target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<TaskId> {
        match self {
            Self::DraggingOver { target, .. } => Some(*target),
            Self::Idle | Self::Dragging { .. } => None,
        }
    }
}

/// Result of a drop gesture.
#[derive(Debug)]
pub enum ReorderOutcome {
    /// No reorder was issued; the collection is untouched.
    Unchanged,
    /// The permutation was persisted; the re-sorted collection.
    Committed(Vec<Task>),
    /// The commit failed; the collection was reloaded from authoritative
    /// storage so the visible order matches persisted order.
    RolledBack {
        /// Authoritative collection after the reload.
        tasks: Vec<Task>,
        /// The commit failure.
        error: TaskRepositoryError,
    },
}

/// Interprets drag events into order permutations and commits them.
///
/// Commit entry points take `&mut self`, so the exclusive borrow holds
/// across the await and a second gesture cannot interleave with a pending
/// commit.
pub struct ReorderCoordinator<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    repository: Arc<TaskRepository<S, C>>,
    state: DragState,
}

impl<S, C> ReorderCoordinator<S, C>
where
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator committing through the given repository.
    #[must_use]
    pub const fn new(repository: Arc<TaskRepository<S, C>>) -> Self {
        Self {
            repository,
            state: DragState::Idle,
        }
    }

    /// Returns the current drag state, for visual feedback.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Begins a drag gesture. Ignored unless idle.
    pub const fn drag_start(&mut self, id: TaskId) {
        if matches!(self.state, DragState::Idle) {
            self.state = DragState::Dragging { source: id };
        }
    }

    /// Records the pointer entering a task card.
    ///
    /// Entering a task other than the source makes it the hover target;
    /// re-entering the current target nests one level deeper.
    pub fn drag_enter(&mut self, id: TaskId) {
        self.state = match self.state {
            DragState::Dragging { source } if id != source => DragState::DraggingOver {
                source,
                target: id,
                depth: 1,
            },
            DragState::DraggingOver {
                source,
                target,
                depth,
            } if id == target => DragState::DraggingOver {
                source,
                target,
                depth: depth + 1,
            },
            DragState::DraggingOver { source, .. } if id != source => DragState::DraggingOver {
                source,
                target: id,
                depth: 1,
            },
            other => other,
        };
    }

    /// Records the pointer leaving a task card; the hover target clears
    /// once the nesting depth unwinds to zero.
    pub fn drag_leave(&mut self) {
        self.state = match self.state {
            DragState::DraggingOver {
                source,
                target,
                depth,
            } if depth > 1 => DragState::DraggingOver {
                source,
                target,
                depth: depth - 1,
            },
            DragState::DraggingOver { source, .. } => DragState::Dragging { source },
            other => other,
        };
    }

    /// Ends the drag gesture unconditionally, including cancellation.
    pub const fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Handles a drop onto `target` given the currently displayed id
    /// sequence.
    ///
    /// The source id is removed from the sequence and reinserted at the
    /// target's position; the resulting permutation is committed
    /// verbatim. Dropping onto the source itself, dropping while idle,
    /// or dropping with stale ids issues no store traffic and leaves the
    /// drag state for [`drag_end`](Self::drag_end) to clear.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] only when the rollback
    /// reload itself fails; commit failures surface as
    /// [`ReorderOutcome::RolledBack`].
    pub async fn drop_on(
        &mut self,
        target: TaskId,
        displayed: &[TaskId],
    ) -> TaskRepositoryResult<ReorderOutcome> {
        let Some(source) = self.state.source() else {
            return Ok(ReorderOutcome::Unchanged);
        };
        if source == target {
            return Ok(ReorderOutcome::Unchanged);
        }
        let Some(ordered) = permutation(displayed, source, target) else {
            return Ok(ReorderOutcome::Unchanged);
        };

        self.state = DragState::Idle;
        self.submit_reorder(&ordered).await
    }

    /// Commits an explicit id permutation through the repository.
    ///
    /// On commit failure the optimistic order is discarded and the
    /// authoritative collection is reloaded, so the visible order never
    /// diverges from persisted order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Store`] only when the rollback
    /// reload itself fails.
    pub async fn submit_reorder(
        &mut self,
        ordered: &[TaskId],
    ) -> TaskRepositoryResult<ReorderOutcome> {
        match self.repository.update_order(ordered).await {
            Ok(tasks) => Ok(ReorderOutcome::Committed(tasks)),
            Err(error) => {
                tracing::warn!(%error, "reorder commit failed, reloading authoritative order");
                let tasks = self.repository.get_all().await?;
                Ok(ReorderOutcome::RolledBack { tasks, error })
            }
        }
    }
}

/// Removes `source` from the sequence and reinserts it at `target`'s
/// original position. Returns `None` when either id is missing.
fn permutation(displayed: &[TaskId], source: TaskId, target: TaskId) -> Option<Vec<TaskId>> {
    let source_index = displayed.iter().position(|id| *id == source)?;
    let target_index = displayed.iter().position(|id| *id == target)?;

    let mut ordered = displayed.to_vec();
    let moved = ordered.remove(source_index);
    let insert_at = target_index.min(ordered.len());
    ordered.insert(insert_at, moved);
    Some(ordered)
}
