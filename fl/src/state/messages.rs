//! State manager messages
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{NewTask, Task, TaskId, TaskStatus};

use super::store::{StatusUpdate, TaskRow};

/// Errors from state operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("Ambiguous task reference '{reference}', candidates: {candidates:?}")]
    Ambiguous { reference: String, candidates: Vec<String> },

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Channel error")]
    ChannelError,
}

/// Response from state operations
pub type StateResponse<T> = Result<T, StateError>;

/// Commands sent to the StateManager actor
#[derive(Debug)]
pub enum StateCommand {
    AddTask {
        task: NewTask,
        reply: oneshot::Sender<StateResponse<Task>>,
    },
    GetTask {
        id: TaskId,
        reply: oneshot::Sender<StateResponse<Option<Task>>>,
    },
    UpdateStatus {
        id: TaskId,
        status: TaskStatus,
        reply: oneshot::Sender<StateResponse<StatusUpdate>>,
    },
    Activate {
        id: TaskId,
        reply: oneshot::Sender<StateResponse<StatusUpdate>>,
    },
    DeleteTask {
        id: TaskId,
        reply: oneshot::Sender<StateResponse<usize>>,
    },
    AppendChildren {
        parent_id: TaskId,
        children: Vec<NewTask>,
        reply: oneshot::Sender<StateResponse<Vec<Task>>>,
    },

    // Queries
    NextActionable {
        reply: oneshot::Sender<StateResponse<Option<Task>>>,
    },
    ListRows {
        reply: oneshot::Sender<StateResponse<Vec<TaskRow>>>,
    },
    ResolveId {
        reference: String,
        reply: oneshot::Sender<StateResponse<TaskId>>,
    },

    // Shutdown
    Shutdown,
}
