//! Pure derivation of the filtered collection view.

use crate::domain::{Priority, Task, TaskFilter};

/// Per-category membership counts over the whole collection.
///
/// Counts are tallied against the unfiltered collection so badges stay
/// stable while switching filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    /// Total number of tasks.
    pub all: usize,
    /// Tasks not yet completed.
    pub pending: usize,
    /// Completed tasks.
    pub completed: usize,
    /// High-priority tasks.
    pub high: usize,
    /// Medium-priority tasks.
    pub medium: usize,
    /// Low-priority tasks.
    pub low: usize,
}

impl TaskCounts {
    /// Tallies category membership for the given collection.
    #[must_use]
    pub fn tally(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            counts.all += 1;
            if task.completed() {
                counts.completed += 1;
            } else {
                counts.pending += 1;
            }
            match task.priority() {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
        }
        counts
    }
}

/// Header summary numbers.
///
/// Pending is derived from the one canonical completion flag, so stats
/// and filters can never disagree about what counts as pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Total number of tasks.
    pub total: usize,
    /// Completed tasks.
    pub completed: usize,
    /// Tasks not yet completed.
    pub pending: usize,
}

impl TaskStats {
    /// Computes summary numbers for the given collection.
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed()).count();
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

/// Derived view of the collection for one (query, filter) input pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionView {
    tasks: Vec<Task>,
    counts: TaskCounts,
}

impl CollectionView {
    /// Derives the filtered sequence and category counts from scratch.
    ///
    /// A trimmed non-empty query keeps only tasks whose title or
    /// description contains it case-insensitively; the filter predicate
    /// applies after the search. The input order is preserved.
    #[must_use]
    pub fn derive(tasks: &[Task], query: &str, filter: TaskFilter) -> Self {
        let counts = TaskCounts::tally(tasks);
        let trimmed = query.trim();
        let filtered = tasks
            .iter()
            .filter(|task| trimmed.is_empty() || matches_query(task, trimmed))
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        Self {
            tasks: filtered,
            counts,
        }
    }

    /// Returns the filtered, ordered task sequence.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the per-category counts.
    #[must_use]
    pub const fn counts(&self) -> &TaskCounts {
        &self.counts
    }
}

/// Returns whether the task's title or description contains the query as
/// a case-insensitive substring. A blank query matches everything.
#[must_use]
pub fn matches_query(task: &Task, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    task.title().as_str().to_lowercase().contains(&needle)
        || task.description().to_lowercase().contains(&needle)
}
