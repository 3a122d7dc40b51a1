//! Task domain type
//!
//! A task is one node in the forest owned by the task store. Links to parent
//! and children are stored as ids, never as references.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::id::generate_id;

/// Opaque task identifier
pub type TaskId = String;

/// Task status
///
/// `Pending -> Active -> Completed`, or `-> Skipped` from either open state.
/// `Completed` and `Skipped` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// Currently presented to the user
    Active,
    /// Done
    Completed,
    /// Dismissed without doing it
    Skipped,
}

impl TaskStatus {
    /// Whether the task is still eligible for work
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Active)
    }

    /// Whether the task has reached a terminal state
    pub fn is_resolved(self) -> bool {
        !self.is_open()
    }

    /// Check whether moving from `self` to `next` is allowed
    ///
    /// Setting the current status again is always accepted.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            Self::Pending => true,
            Self::Active => matches!(next, Self::Completed | Self::Skipped),
            Self::Completed | Self::Skipped => false,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            "skipped" | "skip" => Ok(Self::Skipped),
            other => Err(format!("Unknown task status: '{}'", other)),
        }
    }
}

/// The atomic unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable after creation
    pub id: TaskId,

    /// Display title (never empty)
    pub title: String,

    /// Optional free text
    #[serde(default)]
    pub description: String,

    /// Current status
    pub status: TaskStatus,

    /// Ordered child ids (insertion order is traversal order)
    #[serde(default)]
    pub children_ids: Vec<TaskId>,

    /// Owning task, `None` for roots
    #[serde(default)]
    pub parent_id: Option<TaskId>,

    /// Reward-type task marker
    #[serde(default)]
    pub is_reward: bool,
}

impl Task {
    /// Create a pending task with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(generate_id(), title)
    }

    /// Create with a specific ID (for testing or recovery)
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        let title = title.into();
        debug!(%id, %title, "Task::with_id: called");
        Self {
            id,
            title,
            description: String::new(),
            status: TaskStatus::Pending,
            children_ids: Vec::new(),
            parent_id: None,
            is_reward: false,
        }
    }

    /// Short id for display
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }
}

/// Arguments for creating a task
///
/// ```ignore
/// let step = NewTask::new("Wash dishes").with_parent(&kitchen.id);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub parent_id: Option<TaskId>,
    pub is_reward: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Mark as a reward task
    pub fn reward(mut self) -> Self {
        self.is_reward = true;
        self
    }
}
