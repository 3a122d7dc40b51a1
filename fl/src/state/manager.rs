//! StateManager - actor that owns TaskStore
//!
//! Processes commands via channels so the focus session and background
//! breakdown jobs never touch the forest concurrently.

use std::path::Path;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info};

use crate::domain::{NewTask, Task, TaskId, TaskStatus};

use super::messages::{StateCommand, StateError, StateResponse};
use super::store::{StatusUpdate, TaskRow, TaskStore};

/// Event broadcast when the forest changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// A task was created by the user
    TaskAdded { id: TaskId, parent_id: Option<TaskId> },
    /// A task's status was set
    StatusChanged { id: TaskId, status: TaskStatus },
    /// A task and its subtree were removed
    TaskDeleted { id: TaskId, removed: usize },
    /// Suggested steps were spliced under a task
    ChildrenAppended { parent_id: TaskId, count: usize },
}

/// Handle to send commands to the StateManager
#[derive(Clone)]
pub struct StateManager {
    tx: mpsc::Sender<StateCommand>,
    /// Broadcast sender for state change notifications
    event_tx: broadcast::Sender<StateEvent>,
}

impl StateManager {
    /// Spawn a new StateManager actor over the state file at `store_path`
    pub fn spawn(store_path: impl AsRef<Path>) -> Self {
        debug!(store_path = %store_path.as_ref().display(), "spawn: called");
        Self::spawn_with_store(TaskStore::open(store_path))
    }

    /// Spawn over an already opened store
    pub fn spawn_with_store(store: TaskStore) -> Self {
        info!(
            task_count = store.len(),
            path = %store.path().display(),
            "Task store opened"
        );

        let (tx, rx) = mpsc::channel(256);
        let (event_tx, _) = broadcast::channel(64);

        tokio::spawn(actor_loop(store, rx));

        info!("StateManager spawned");

        Self { tx, event_tx }
    }

    /// Subscribe to state change events
    pub fn subscribe_events(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<StateResponse<T>>) -> StateCommand) -> StateResponse<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(build(reply_tx))
            .await
            .map_err(|_| StateError::ChannelError)?;
        reply_rx.await.map_err(|_| StateError::ChannelError)?
    }

    /// Create a task (root, or under `parent_id` when it exists)
    pub async fn add_task(&self, task: NewTask) -> StateResponse<Task> {
        debug!(title = %task.title, parent_id = ?task.parent_id, "add_task: called");
        let created = self.request(|reply| StateCommand::AddTask { task, reply }).await?;

        let _ = self.event_tx.send(StateEvent::TaskAdded {
            id: created.id.clone(),
            parent_id: created.parent_id.clone(),
        });

        Ok(created)
    }

    /// Get a task by id
    pub async fn get_task(&self, id: &str) -> StateResponse<Option<Task>> {
        debug!(%id, "get_task: called");
        self.request(|reply| StateCommand::GetTask {
            id: id.to_string(),
            reply,
        })
        .await
    }

    /// Get a task by id, returning error if not found
    pub async fn get_task_required(&self, id: &str) -> StateResponse<Task> {
        debug!(%id, "get_task_required: called");
        self.get_task(id)
            .await?
            .ok_or_else(|| StateError::NotFound(id.to_string()))
    }

    /// Set a task's status
    pub async fn update_status(&self, id: &str, status: TaskStatus) -> StateResponse<StatusUpdate> {
        debug!(%id, %status, "update_status: called");
        let result = self
            .request(|reply| StateCommand::UpdateStatus {
                id: id.to_string(),
                status,
                reply,
            })
            .await?;

        if result == StatusUpdate::Applied {
            let _ = self.event_tx.send(StateEvent::StatusChanged {
                id: id.to_string(),
                status,
            });
        }

        Ok(result)
    }

    /// Mark a task done
    pub async fn complete(&self, id: &str) -> StateResponse<StatusUpdate> {
        self.update_status(id, TaskStatus::Completed).await
    }

    /// Dismiss a task without doing it
    pub async fn skip(&self, id: &str) -> StateResponse<StatusUpdate> {
        self.update_status(id, TaskStatus::Skipped).await
    }

    /// Mark the presented task as active
    pub async fn activate(&self, id: &str) -> StateResponse<StatusUpdate> {
        debug!(%id, "activate: called");
        self.request(|reply| StateCommand::Activate {
            id: id.to_string(),
            reply,
        })
        .await
    }

    /// Delete a task and its subtree, returning how many tasks were removed
    pub async fn delete_task(&self, id: &str) -> StateResponse<usize> {
        debug!(%id, "delete_task: called");
        let removed = self
            .request(|reply| StateCommand::DeleteTask {
                id: id.to_string(),
                reply,
            })
            .await?;

        if removed > 0 {
            let _ = self.event_tx.send(StateEvent::TaskDeleted {
                id: id.to_string(),
                removed,
            });
        }

        Ok(removed)
    }

    /// Splice steps under an open parent; empty when the parent is gone or resolved
    pub async fn append_children(&self, parent_id: &str, children: Vec<NewTask>) -> StateResponse<Vec<Task>> {
        debug!(%parent_id, count = children.len(), "append_children: called");
        let created = self
            .request(|reply| StateCommand::AppendChildren {
                parent_id: parent_id.to_string(),
                children,
                reply,
            })
            .await?;

        if !created.is_empty() {
            let _ = self.event_tx.send(StateEvent::ChildrenAppended {
                parent_id: parent_id.to_string(),
                count: created.len(),
            });
        }

        Ok(created)
    }

    /// The task to work on now
    pub async fn next_actionable(&self) -> StateResponse<Option<Task>> {
        debug!("next_actionable: called");
        self.request(|reply| StateCommand::NextActionable { reply }).await
    }

    /// Pre-order listing of the forest
    pub async fn list_rows(&self) -> StateResponse<Vec<TaskRow>> {
        debug!("list_rows: called");
        self.request(|reply| StateCommand::ListRows { reply }).await
    }

    /// Resolve a full id, id prefix or title fragment to a task id
    pub async fn resolve_id(&self, reference: &str) -> StateResponse<TaskId> {
        debug!(%reference, "resolve_id: called");
        self.request(|reply| StateCommand::ResolveId {
            reference: reference.to_string(),
            reply,
        })
        .await
    }

    /// Shutdown the StateManager
    pub async fn shutdown(&self) -> Result<(), StateError> {
        debug!("shutdown: called");
        self.tx
            .send(StateCommand::Shutdown)
            .await
            .map_err(|_| StateError::ChannelError)
    }
}

/// The actor loop that owns the TaskStore and processes commands
async fn actor_loop(mut store: TaskStore, mut rx: mpsc::Receiver<StateCommand>) {
    debug!("StateManager actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            StateCommand::AddTask { task, reply } => {
                debug!(title = %task.title, "actor_loop: AddTask command");
                let _ = reply.send(store.add_task(task));
            }

            StateCommand::GetTask { id, reply } => {
                debug!(%id, "actor_loop: GetTask command");
                let _ = reply.send(Ok(store.get_task(&id).cloned()));
            }

            StateCommand::UpdateStatus { id, status, reply } => {
                debug!(%id, %status, "actor_loop: UpdateStatus command");
                let _ = reply.send(store.update_status(&id, status));
            }

            StateCommand::Activate { id, reply } => {
                debug!(%id, "actor_loop: Activate command");
                let _ = reply.send(store.activate(&id));
            }

            StateCommand::DeleteTask { id, reply } => {
                debug!(%id, "actor_loop: DeleteTask command");
                let _ = reply.send(store.delete_task(&id));
            }

            StateCommand::AppendChildren {
                parent_id,
                children,
                reply,
            } => {
                debug!(%parent_id, count = children.len(), "actor_loop: AppendChildren command");
                let _ = reply.send(store.append_children(&parent_id, children));
            }

            StateCommand::NextActionable { reply } => {
                debug!("actor_loop: NextActionable command");
                let _ = reply.send(Ok(store.next_actionable_task().cloned()));
            }

            StateCommand::ListRows { reply } => {
                debug!("actor_loop: ListRows command");
                let _ = reply.send(Ok(store.rows()));
            }

            StateCommand::ResolveId { reference, reply } => {
                debug!(%reference, "actor_loop: ResolveId command");
                let _ = reply.send(store.resolve_id(&reference));
            }

            StateCommand::Shutdown => {
                debug!("actor_loop: Shutdown command");
                info!("StateManager shutting down");
                break;
            }
        }
    }

    debug!("StateManager actor stopped");
}
