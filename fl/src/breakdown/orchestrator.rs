//! Orchestrator - background suggestion calls with hand-off to the state owner

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::{NewTask, Task, TaskId};
use crate::state::{StateError, StateManager};
use crate::suggest::{SuggestedStep, Suggester};

/// Errors from breakdown requests
#[derive(Debug, Error)]
pub enum BreakdownError {
    #[error("A suggestion request for task {0} is already running")]
    InFlight(TaskId),

    #[error("Suggestion worker failed: {0}")]
    Worker(String),

    #[error(transparent)]
    State(#[from] StateError),
}

/// What was asked of the suggestion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakdownKind {
    BreakDown,
    ResolveBlock { reason: String, language: String },
}

/// A finished suggestion call, waiting to be applied by the state owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownOutcome {
    pub task_id: TaskId,
    pub kind: BreakdownKind,
    pub steps: Vec<SuggestedStep>,
}

/// Marks a task as having a request in flight until dropped
struct InFlightGuard {
    task_id: TaskId,
    in_flight: Arc<Mutex<HashSet<TaskId>>>,
}

impl InFlightGuard {
    fn acquire(in_flight: &Arc<Mutex<HashSet<TaskId>>>, task_id: &str) -> Result<Self, BreakdownError> {
        let mut set = in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(task_id.to_string()) {
            debug!(%task_id, "InFlightGuard::acquire: already in flight");
            return Err(BreakdownError::InFlight(task_id.to_string()));
        }
        Ok(Self {
            task_id: task_id.to_string(),
            in_flight: Arc::clone(in_flight),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.task_id);
    }
}

/// Coordinates suggestion calls and splices their steps under tasks
#[derive(Clone)]
pub struct Orchestrator {
    state: StateManager,
    suggester: Arc<dyn Suggester>,
    in_flight: Arc<Mutex<HashSet<TaskId>>>,
    outcome_tx: mpsc::Sender<BreakdownOutcome>,
}

impl Orchestrator {
    /// Create an orchestrator and the receiver its background outcomes arrive on
    pub fn new(state: StateManager, suggester: Arc<dyn Suggester>) -> (Self, mpsc::Receiver<BreakdownOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::channel(16);
        let orchestrator = Self {
            state,
            suggester,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            outcome_tx,
        };
        (orchestrator, outcome_rx)
    }

    /// Whether a request for `task_id` is currently running
    pub fn is_in_flight(&self, task_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(task_id)
    }

    /// Break a task into steps and add them as its children
    ///
    /// Returns how many steps were added; zero means the service produced
    /// nothing usable or the task was resolved or deleted meanwhile.
    pub async fn break_down_task(&self, task: &Task) -> Result<usize, BreakdownError> {
        debug!(task_id = %task.id, "break_down_task: called");
        self.run(task, BreakdownKind::BreakDown).await
    }

    /// Ask for steps that get past `reason` and add them as children of `task`
    pub async fn resolve_block(&self, task: &Task, reason: &str, language: &str) -> Result<usize, BreakdownError> {
        debug!(task_id = %task.id, %reason, %language, "resolve_block: called");
        let kind = BreakdownKind::ResolveBlock {
            reason: reason.to_string(),
            language: language.to_string(),
        };
        self.run(task, kind).await
    }

    /// Start a breakdown without waiting; the outcome arrives on the receiver
    pub fn spawn_break_down(&self, task: &Task) -> Result<(), BreakdownError> {
        debug!(task_id = %task.id, "spawn_break_down: called");
        self.spawn(task, BreakdownKind::BreakDown)
    }

    /// Start a block resolution without waiting; the outcome arrives on the receiver
    pub fn spawn_resolve_block(&self, task: &Task, reason: &str, language: &str) -> Result<(), BreakdownError> {
        debug!(task_id = %task.id, %reason, "spawn_resolve_block: called");
        let kind = BreakdownKind::ResolveBlock {
            reason: reason.to_string(),
            language: language.to_string(),
        };
        self.spawn(task, kind)
    }

    /// Splice a received outcome into the forest, returning how many steps were added
    pub async fn apply(&self, outcome: BreakdownOutcome) -> Result<usize, BreakdownError> {
        debug!(task_id = %outcome.task_id, count = outcome.steps.len(), "apply: called");
        if outcome.steps.is_empty() {
            info!(task_id = %outcome.task_id, kind = ?outcome.kind, "No steps suggested");
            return Ok(0);
        }

        let children: Vec<NewTask> = outcome.steps.into_iter().map(NewTask::from).collect();
        let created = self.state.append_children(&outcome.task_id, children).await?;
        info!(task_id = %outcome.task_id, added = created.len(), "Applied suggested steps");
        Ok(created.len())
    }

    async fn run(&self, task: &Task, kind: BreakdownKind) -> Result<usize, BreakdownError> {
        let _guard = InFlightGuard::acquire(&self.in_flight, &task.id)?;

        let worker = tokio::spawn(suggest(
            Arc::clone(&self.suggester),
            task.id.clone(),
            task.title.clone(),
            task.description.clone(),
            kind,
        ));
        let outcome = worker.await.map_err(|e| BreakdownError::Worker(e.to_string()))?;

        self.apply(outcome).await
    }

    fn spawn(&self, task: &Task, kind: BreakdownKind) -> Result<(), BreakdownError> {
        let guard = InFlightGuard::acquire(&self.in_flight, &task.id)?;
        let suggester = Arc::clone(&self.suggester);
        let outcome_tx = self.outcome_tx.clone();
        let (task_id, title, description) = (task.id.clone(), task.title.clone(), task.description.clone());

        tokio::spawn(async move {
            let _guard = guard;
            let outcome = suggest(suggester, task_id, title, description, kind).await;
            if outcome_tx.send(outcome).await.is_err() {
                warn!("Breakdown outcome dropped, receiver closed");
            }
        });

        Ok(())
    }
}

/// The background unit: only talks to the suggester, never to the store
async fn suggest(
    suggester: Arc<dyn Suggester>,
    task_id: TaskId,
    title: String,
    description: String,
    kind: BreakdownKind,
) -> BreakdownOutcome {
    let steps = match &kind {
        BreakdownKind::BreakDown => suggester.break_down(&title, &description).await,
        BreakdownKind::ResolveBlock { reason, language } => suggester.resolve_block(&title, reason, language).await,
    };
    debug!(%task_id, count = steps.len(), "suggest: finished");
    BreakdownOutcome { task_id, kind, steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use crate::suggest::MockSuggester;
    use async_trait::async_trait;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::sync::Semaphore;

    /// Suggester that waits for a permit per call
    struct GatedSuggester {
        gate: Arc<Semaphore>,
    }

    impl GatedSuggester {
        async fn pass(&self) {
            self.gate.acquire().await.unwrap().forget();
        }
    }

    #[async_trait]
    impl Suggester for GatedSuggester {
        async fn break_down(&self, title: &str, _description: &str) -> Vec<SuggestedStep> {
            self.pass().await;
            vec![SuggestedStep::new(format!("Later {}", title), "")]
        }

        async fn resolve_block(&self, _title: &str, _reason: &str, _language: &str) -> Vec<SuggestedStep> {
            self.pass().await;
            Vec::new()
        }
    }

    struct EmptySuggester;

    #[async_trait]
    impl Suggester for EmptySuggester {
        async fn break_down(&self, _title: &str, _description: &str) -> Vec<SuggestedStep> {
            Vec::new()
        }

        async fn resolve_block(&self, _title: &str, _reason: &str, _language: &str) -> Vec<SuggestedStep> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn test_break_down_task_adds_children_in_order() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path().join("tasks.json"));
        let (orchestrator, _rx) = Orchestrator::new(state.clone(), Arc::new(MockSuggester));

        let task = state.add_task(NewTask::new("Clean kitchen")).await.unwrap();
        let added = orchestrator.break_down_task(&task).await.unwrap();
        assert_eq!(added, 2);

        let parent = state.get_task_required(&task.id).await.unwrap();
        assert_eq!(parent.children_ids.len(), 2);
        let first = state.get_task_required(&parent.children_ids[0]).await.unwrap();
        assert_eq!(first.title, "Step 1 for Clean kitchen");
        assert_eq!(first.description, "First step");
        assert_eq!(state.next_actionable().await.unwrap().unwrap().id, first.id);
        assert!(!orchestrator.is_in_flight(&task.id));

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_block_adds_children() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path().join("tasks.json"));
        let (orchestrator, _rx) = Orchestrator::new(state.clone(), Arc::new(MockSuggester));

        let task = state.add_task(NewTask::new("Taxes")).await.unwrap();
        let added = orchestrator.resolve_block(&task, "no forms", "en").await.unwrap();
        assert_eq!(added, 2);

        let next = state.next_actionable().await.unwrap().unwrap();
        assert_eq!(next.title, "Address: no forms");
        assert_eq!(next.parent_id.as_deref(), Some(task.id.as_str()));

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_suggestion_adds_nothing() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path().join("tasks.json"));
        let (orchestrator, _rx) = Orchestrator::new(state.clone(), Arc::new(EmptySuggester));

        let task = state.add_task(NewTask::new("Nothing to say")).await.unwrap();
        assert_eq!(orchestrator.break_down_task(&task).await.unwrap(), 0);
        assert!(state.get_task_required(&task.id).await.unwrap().children_ids.is_empty());

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_spawned_outcome_is_handed_back() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path().join("tasks.json"));
        let (orchestrator, mut rx) = Orchestrator::new(state.clone(), Arc::new(MockSuggester));

        let task = state.add_task(NewTask::new("Laundry")).await.unwrap();
        orchestrator.spawn_break_down(&task).unwrap();

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.task_id, task.id);
        assert_eq!(outcome.kind, BreakdownKind::BreakDown);

        // Nothing is spliced until the owner applies it
        assert!(state.get_task_required(&task.id).await.unwrap().children_ids.is_empty());
        assert_eq!(orchestrator.apply(outcome).await.unwrap(), 2);
        assert_eq!(state.get_task_required(&task.id).await.unwrap().children_ids.len(), 2);

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_second_request_for_same_task_rejected() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path().join("tasks.json"));
        let gate = Arc::new(Semaphore::new(0));
        let (orchestrator, mut rx) = Orchestrator::new(state.clone(), Arc::new(GatedSuggester { gate: gate.clone() }));

        let task = state.add_task(NewTask::new("Slow")).await.unwrap();
        let other = state.add_task(NewTask::new("Other")).await.unwrap();

        orchestrator.spawn_break_down(&task).unwrap();
        assert!(orchestrator.is_in_flight(&task.id));
        assert!(matches!(
            orchestrator.spawn_break_down(&task),
            Err(BreakdownError::InFlight(_))
        ));
        assert!(matches!(
            orchestrator.resolve_block(&task, "stuck", "en").await,
            Err(BreakdownError::InFlight(_))
        ));

        // Other tasks are unaffected
        orchestrator.spawn_break_down(&other).unwrap();

        gate.add_permits(2);
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        let mut ids = vec![first.task_id, second.task_id];
        ids.sort();
        let mut expected = vec![task.id.clone(), other.id.clone()];
        expected.sort();
        assert_eq!(ids, expected);

        // Guard is released once the background unit finishes
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!orchestrator.is_in_flight(&task.id));
        orchestrator.spawn_break_down(&task).unwrap();
        gate.add_permits(1);
        assert!(rx.recv().await.is_some());

        state.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_stale_outcome_is_discarded() {
        let temp = tempdir().unwrap();
        let state = StateManager::spawn(temp.path().join("tasks.json"));
        let (orchestrator, mut rx) = Orchestrator::new(state.clone(), Arc::new(MockSuggester));

        let deleted = state.add_task(NewTask::new("Deleted meanwhile")).await.unwrap();
        let done = state.add_task(NewTask::new("Done meanwhile")).await.unwrap();
        orchestrator.spawn_break_down(&deleted).unwrap();
        let deleted_outcome = rx.recv().await.unwrap();
        orchestrator.spawn_break_down(&done).unwrap();
        let done_outcome = rx.recv().await.unwrap();

        state.delete_task(&deleted.id).await.unwrap();
        state.update_status(&done.id, TaskStatus::Completed).await.unwrap();

        assert_eq!(orchestrator.apply(deleted_outcome).await.unwrap(), 0);
        assert_eq!(orchestrator.apply(done_outcome).await.unwrap(), 0);
        assert!(state.get_task_required(&done.id).await.unwrap().children_ids.is_empty());
        assert_eq!(state.list_rows().await.unwrap().len(), 1);

        state.shutdown().await.unwrap();
    }
}
