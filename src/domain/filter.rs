//! Enumerated collection filter keys.

use super::{ParseFilterError, Priority, Task, TaskStatus};

/// Named predicate selecting a subset of tasks.
///
/// Exactly one filter is active at a time; combining two status or
/// priority filters is unrepresentable by construction. Combining a
/// filter with a free-text search query is a view-model concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    /// No filtering; every task matches.
    #[default]
    All,
    /// Tasks matching a completion status.
    Status(TaskStatus),
    /// Tasks matching a priority level.
    Priority(Priority),
}

impl TaskFilter {
    /// Returns the canonical filter key (`all`, `pending`, `completed`,
    /// `high`, `medium`, or `low`).
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
            Self::Priority(priority) => priority.as_str(),
        }
    }

    /// Returns whether the given task satisfies this filter's predicate.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => status.matches(task.completed()),
            Self::Priority(priority) => task.priority() == priority,
        }
    }
}

impl TryFrom<&str> for TaskFilter {
    type Error = ParseFilterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Status(TaskStatus::Pending)),
            "completed" => Ok(Self::Status(TaskStatus::Completed)),
            "low" => Ok(Self::Priority(Priority::Low)),
            "medium" => Ok(Self::Priority(Priority::Medium)),
            "high" => Ok(Self::Priority(Priority::High)),
            _ => Err(ParseFilterError(value.to_owned())),
        }
    }
}
