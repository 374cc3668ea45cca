//! Completion status keys.

use super::ParseStatusError;
use serde::{Deserialize, Serialize};

/// Completion status of a task.
///
/// This is a predicate key over the single canonical `completed` flag, not
/// a separately stored field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// The task has not been completed.
    Pending,
    /// The task has been completed.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical key representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Returns whether a task with the given completion flag matches.
    #[must_use]
    pub const fn matches(self, completed: bool) -> bool {
        match self {
            Self::Pending => !completed,
            Self::Completed => completed,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}
