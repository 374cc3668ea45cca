//! Task aggregate root and partial-update semantics.

use super::{Priority, TaskId, TaskTitle};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// The single persisted work item entity.
///
/// Invariants maintained by this type:
///
/// - `completed_at` is set exactly when `completed` is true, unless a
///   caller supplied an explicit override at creation or in a patch.
/// - `created_at` never changes after creation.
/// - `sort_order` is mutated only through reordering, creation, or an
///   explicit patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    priority: Priority,
    completed: bool,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    sort_order: i64,
}

/// Parameter object describing a task to be created.
///
/// Only the title is required; every other field carries the creation
/// default until overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    description: String,
    priority: Priority,
    completed: bool,
    created_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    sort_order: Option<i64>,
}

impl NewTask {
    /// Creates a draft with the given title and creation defaults.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: String::new(),
            priority: Priority::Medium,
            completed: false,
            created_at: None,
            completed_at: None,
            sort_order: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Overrides the completion timestamp.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Overrides the assigned order value.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Returns the explicit order override, if any.
    #[must_use]
    pub const fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }
}

/// Partial update for an existing task.
///
/// Absent fields leave the task untouched. The completion timestamp is
/// double-optional so that an explicit clear is representable alongside
/// "derive from the completion transition".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<String>,
    priority: Option<Priority>,
    completed: Option<bool>,
    completed_at: Option<Option<DateTime<Utc>>>,
    sort_order: Option<i64>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the completion flag; the completion timestamp is derived from
    /// the transition unless [`with_completed_at`](Self::with_completed_at)
    /// is also present.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Explicitly sets or clears the completion timestamp, bypassing
    /// transition-based derivation.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }

    /// Replaces the order value.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted order value.
    pub sort_order: i64,
}

impl Task {
    /// Creates a new task from a draft with identity and order assigned by
    /// the caller.
    ///
    /// Creating an already-completed task without an explicit completion
    /// timestamp stamps it with the creation timestamp, so the
    /// completion invariant holds from birth.
    #[must_use]
    pub fn create(id: TaskId, sort_order: i64, draft: NewTask, clock: &impl Clock) -> Self {
        let created_at = draft.created_at.unwrap_or_else(|| clock.utc());
        let completed_at = match draft.completed_at {
            Some(timestamp) => Some(timestamp),
            None if draft.completed => Some(created_at),
            None => None,
        };

        Self {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            completed: draft.completed,
            created_at,
            completed_at,
            sort_order,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            completed: data.completed,
            created_at: data.created_at,
            completed_at: data.completed_at,
            sort_order: data.sort_order,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the order value defining the display sequence.
    #[must_use]
    pub const fn sort_order(&self) -> i64 {
        self.sort_order
    }

    /// Applies a partial update.
    ///
    /// A completion-flag change derives the completion timestamp from the
    /// transition; an explicit timestamp in the patch wins over the
    /// derived value.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(completed) = patch.completed {
            self.set_completed(completed, clock);
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
    }

    /// Sets the completion flag, deriving the completion timestamp.
    ///
    /// The timestamp is stamped on the false-to-true transition and
    /// cleared whenever the task becomes pending; marking an
    /// already-completed task completed again keeps the original
    /// timestamp.
    pub fn set_completed(&mut self, completed: bool, clock: &impl Clock) {
        if completed {
            if !self.completed {
                self.completed_at = Some(clock.utc());
            }
        } else {
            self.completed_at = None;
        }
        self.completed = completed;
    }

    /// Reassigns the order value.
    pub const fn set_sort_order(&mut self, sort_order: i64) {
        self.sort_order = sort_order;
    }
}
