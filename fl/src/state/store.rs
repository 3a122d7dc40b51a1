//! TaskStore - arena of tasks with write-through JSON persistence
//!
//! Tasks live in a flat map keyed by id; the tree shape is carried by
//! `parent_id` / `children_ids` plus the ordered root list. Every mutation
//! rewrites the whole state file.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::{IdResolver, NewTask, Task, TaskId, TaskStatus};

use super::forest::{self, ForestViolation};
use super::messages::{StateError, StateResponse};
use super::resolver;

/// On-disk document
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    root_task_ids: Vec<TaskId>,
}

/// Result of a status change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Status set and persisted
    Applied,
    /// Already in that status; nothing written
    Unchanged,
    /// No task with that id
    UnknownTask,
    /// Transition not allowed from the current status
    Rejected { from: TaskStatus },
}

/// A task with its depth in the forest, for listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task: Task,
    pub depth: usize,
}

/// The task forest and its backing file
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: HashMap<TaskId, Task>,
    root_task_ids: Vec<TaskId>,
}

impl TaskStore {
    /// Open the store at `path`, loading whatever valid state is there
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "TaskStore::open: called");
        let mut store = Self {
            path,
            tasks: HashMap::new(),
            root_task_ids: Vec::new(),
        };
        store.load();
        store
    }

    /// Path of the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload from disk
    ///
    /// A missing, unreadable or malformed file yields an empty forest; nothing
    /// is surfaced to the caller. Structural damage in a parseable file is
    /// repaired rather than discarded.
    pub fn load(&mut self) {
        debug!(path = %self.path.display(), "load: called");
        self.tasks.clear();
        self.root_task_ids.clear();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No state file, starting with an empty forest");
                return;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read state file, starting empty");
                return;
            }
        };

        let document: StateDocument = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Malformed state file, starting empty");
                return;
            }
        };

        self.tasks = document.tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
        self.root_task_ids = document.root_task_ids;

        let fixes = forest::repair(&mut self.tasks, &mut self.root_task_ids);
        if fixes > 0 {
            warn!(fixes, "Repaired inconsistent task forest on load");
        }
        self.log_violations("load");

        info!(
            task_count = self.tasks.len(),
            root_count = self.root_task_ids.len(),
            "Loaded task state"
        );
    }

    /// Write the full forest to disk
    ///
    /// Writes a sibling temp file and renames it over the target, so a crash
    /// mid-write leaves the previous state intact.
    pub fn save(&self) -> StateResponse<()> {
        debug!(path = %self.path.display(), task_count = self.tasks.len(), "save: called");
        if cfg!(debug_assertions) {
            self.log_violations("save");
        }
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| StateError::StoreError(format!("create {}: {}", dir.display(), e)))?;

        let document = StateDocument {
            tasks: self.rows().into_iter().map(|row| row.task).collect(),
            root_task_ids: self.root_task_ids.clone(),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| StateError::StoreError(e.to_string()))?;
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut tmp, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| StateError::StoreError(e.to_string()))?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StateError::StoreError(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| StateError::StoreError(format!("persist {}: {}", self.path.display(), e)))?;

        Ok(())
    }

    /// Create a task and persist
    ///
    /// A parent id that does not resolve places the task at the root.
    pub fn add_task(&mut self, new: NewTask) -> StateResponse<Task> {
        debug!(title = %new.title, parent_id = ?new.parent_id, "add_task: called");
        let task = self.insert(new)?;
        self.save()?;
        Ok(task)
    }

    /// Splice children under `parent_id` in order, persisting once
    ///
    /// Returns the created tasks. Nothing is added when the parent is unknown
    /// or already resolved, and steps with blank titles are skipped.
    pub fn append_children(&mut self, parent_id: &str, children: Vec<NewTask>) -> StateResponse<Vec<Task>> {
        debug!(%parent_id, count = children.len(), "append_children: called");
        match self.tasks.get(parent_id) {
            Some(parent) if parent.status.is_open() => {}
            Some(parent) => {
                info!(%parent_id, status = %parent.status, "Discarding steps for resolved task");
                return Ok(Vec::new());
            }
            None => {
                info!(%parent_id, "Discarding steps for deleted task");
                return Ok(Vec::new());
            }
        }

        let mut created = Vec::new();
        for child in children {
            let child = NewTask {
                parent_id: Some(parent_id.to_string()),
                ..child
            };
            match self.insert(child) {
                Ok(task) => created.push(task),
                Err(StateError::EmptyTitle) => debug!("append_children: skipping step with empty title"),
                Err(e) => return Err(e),
            }
        }

        if !created.is_empty() {
            self.save()?;
        }
        Ok(created)
    }

    fn insert(&mut self, new: NewTask) -> StateResponse<Task> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(StateError::EmptyTitle);
        }

        let mut task = Task::new(title);
        task.description = new.description;
        task.is_reward = new.is_reward;

        match new.parent_id.as_deref().and_then(|id| self.tasks.get_mut(id)) {
            Some(parent) => {
                parent.children_ids.push(task.id.clone());
                task.parent_id = Some(parent.id.clone());
            }
            None => {
                if let Some(missing) = &new.parent_id {
                    warn!(parent_id = %missing, "Parent not found, adding task at root");
                }
                self.root_task_ids.push(task.id.clone());
            }
        }

        self.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    /// Look up a task
    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Set a task's status and persist
    pub fn update_status(&mut self, id: &str, status: TaskStatus) -> StateResponse<StatusUpdate> {
        debug!(%id, %status, "update_status: called");
        let Some(task) = self.tasks.get_mut(id) else {
            debug!(%id, "update_status: unknown task");
            return Ok(StatusUpdate::UnknownTask);
        };

        if task.status == status {
            debug!(%id, %status, "update_status: already in status");
            return Ok(StatusUpdate::Unchanged);
        }

        if !task.status.can_transition_to(status) {
            warn!(%id, from = %task.status, to = %status, "Rejected status transition");
            return Ok(StatusUpdate::Rejected { from: task.status });
        }

        task.status = status;
        self.save()?;
        Ok(StatusUpdate::Applied)
    }

    /// Mark the task being presented to the user as `Active`
    ///
    /// Only pending tasks move; an already active task is left alone.
    pub fn activate(&mut self, id: &str) -> StateResponse<StatusUpdate> {
        debug!(%id, "activate: called");
        match self.tasks.get(id).map(|t| t.status) {
            None => Ok(StatusUpdate::UnknownTask),
            Some(TaskStatus::Active) => Ok(StatusUpdate::Unchanged),
            Some(TaskStatus::Pending) => self.update_status(id, TaskStatus::Active),
            Some(from) => Ok(StatusUpdate::Rejected { from }),
        }
    }

    /// Delete a task with its whole subtree and persist
    ///
    /// Returns how many tasks were removed; unknown ids remove nothing.
    pub fn delete_task(&mut self, id: &str) -> StateResponse<usize> {
        debug!(%id, "delete_task: called");
        let Some(task) = self.tasks.get(id) else {
            debug!(%id, "delete_task: unknown task");
            return Ok(0);
        };

        match task.parent_id.clone() {
            Some(parent_id) => {
                if let Some(parent) = self.tasks.get_mut(&parent_id) {
                    parent.children_ids.retain(|c| c != id);
                }
            }
            None => self.root_task_ids.retain(|r| r != id),
        }

        let mut removed = 0;
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(task) = self.tasks.remove(&current) {
                stack.extend(task.children_ids);
                removed += 1;
            }
        }

        info!(%id, removed, "Deleted task subtree");
        self.save()?;
        Ok(removed)
    }

    /// The task the user should work on now, computed from current state
    pub fn next_actionable_task(&self) -> Option<&Task> {
        resolver::next_actionable(&self.tasks, &self.root_task_ids)
    }

    /// Resolve a user-typed reference (full id, id prefix or title words)
    pub fn resolve_id(&self, reference: &str) -> StateResponse<TaskId> {
        let titles: HashMap<String, String> = self
            .tasks
            .values()
            .map(|t| (t.id.clone(), t.title.clone()))
            .collect();
        match IdResolver::new(&titles).resolve(reference) {
            Ok(Some(id)) => Ok(id),
            Ok(None) => Err(StateError::NotFound(reference.to_string())),
            Err(candidates) => Err(StateError::Ambiguous {
                reference: reference.to_string(),
                candidates,
            }),
        }
    }

    /// Pre-order walk of the forest with depths
    pub fn rows(&self) -> Vec<TaskRow> {
        let mut rows = Vec::with_capacity(self.tasks.len());
        let mut seen = HashSet::new();
        let mut stack: Vec<(&str, usize)> = self.root_task_ids.iter().rev().map(|id| (id.as_str(), 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let Some(task) = self.tasks.get(id) else { continue };
            if !seen.insert(id) {
                continue;
            }
            stack.extend(task.children_ids.iter().rev().map(|c| (c.as_str(), depth + 1)));
            rows.push(TaskRow {
                task: task.clone(),
                depth,
            });
        }

        rows
    }

    /// Ordered root ids
    pub fn root_task_ids(&self) -> &[TaskId] {
        &self.root_task_ids
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Verify the forest invariants
    pub fn check_forest(&self) -> Vec<ForestViolation> {
        forest::check(&self.tasks, &self.root_task_ids)
    }

    /// Log each broken forest invariant at debug; returns how many were found
    pub fn log_violations(&self, context: &str) -> usize {
        let violations = self.check_forest();
        for violation in &violations {
            debug!(%context, %violation, "Forest invariant violated");
        }
        violations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, TaskStore) {
        let temp = TempDir::new().unwrap();
        let store = TaskStore::open(temp.path().join("data").join("tasks.json"));
        (temp, store)
    }

    #[test]
    fn test_missing_file_is_empty_forest() {
        let (_temp, store) = open_temp();
        assert!(store.is_empty());
        assert!(store.next_actionable_task().is_none());
    }

    #[test]
    fn test_malformed_file_is_empty_forest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();

        let store = TaskStore::open(&path);
        assert!(store.is_empty());
        assert!(store.root_task_ids().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_empty_forest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, r#"{"tasks": [{"title": "no id"}], "root_task_ids": []}"#).unwrap();

        let store = TaskStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_root_and_child() {
        let (_temp, mut store) = open_temp();
        let parent = store.add_task(NewTask::new("Clean kitchen")).unwrap();
        let child = store
            .add_task(NewTask::new("Wash dishes").with_parent(&parent.id))
            .unwrap();

        assert_eq!(store.root_task_ids(), &[parent.id.clone()]);
        assert_eq!(store.get_task(&parent.id).unwrap().children_ids, vec![child.id.clone()]);
        assert_eq!(child.parent_id.as_deref(), Some(parent.id.as_str()));
        assert!(store.check_forest().is_empty());
    }

    #[test]
    fn test_log_violations_counts_broken_invariants() {
        let (_temp, mut store) = open_temp();
        let parent = store.add_task(NewTask::new("Parent")).unwrap();
        store.add_task(NewTask::new("Child").with_parent(&parent.id)).unwrap();
        assert_eq!(store.log_violations("test"), 0);

        // Orphan the child by dropping the parent from the map only
        store.tasks.remove(&parent.id);
        assert!(store.log_violations("test") > 0);
    }

    #[test]
    fn test_add_with_unknown_parent_goes_to_root() {
        let (_temp, mut store) = open_temp();
        let task = store.add_task(NewTask::new("Lost").with_parent("nope")).unwrap();
        assert!(task.parent_id.is_none());
        assert_eq!(store.root_task_ids(), &[task.id.clone()]);
        assert!(store.check_forest().is_empty());
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let (_temp, mut store) = open_temp();
        let result = store.add_task(NewTask::new("   "));
        assert!(matches!(result, Err(StateError::EmptyTitle)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_trims_title() {
        let (_temp, mut store) = open_temp();
        let task = store.add_task(NewTask::new("  Call mom \n")).unwrap();
        assert_eq!(task.title, "Call mom");
    }

    #[test]
    fn test_add_persists_immediately() {
        let (_temp, mut store) = open_temp();
        let task = store.add_task(NewTask::new("Write it down").reward()).unwrap();

        let reopened = TaskStore::open(store.path());
        let loaded = reopened.get_task(&task.id).unwrap();
        assert_eq!(loaded, &task);
        assert!(loaded.is_reward);
    }

    #[test]
    fn test_update_status_unknown_is_noop() {
        let (_temp, mut store) = open_temp();
        assert_eq!(
            store.update_status("ghost", TaskStatus::Completed).unwrap(),
            StatusUpdate::UnknownTask
        );
        assert!(!store.path().exists());
    }

    #[test]
    fn test_update_status_rejects_leaving_terminal() {
        let (_temp, mut store) = open_temp();
        let task = store.add_task(NewTask::new("Done already")).unwrap();
        store.update_status(&task.id, TaskStatus::Completed).unwrap();

        let result = store.update_status(&task.id, TaskStatus::Pending).unwrap();
        assert_eq!(
            result,
            StatusUpdate::Rejected {
                from: TaskStatus::Completed
            }
        );
        assert_eq!(store.get_task(&task.id).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn test_same_status_update_writes_nothing() {
        let (_temp, mut store) = open_temp();
        let task = store.add_task(NewTask::new("Finished")).unwrap();
        store.update_status(&task.id, TaskStatus::Completed).unwrap();

        fs::remove_file(store.path()).unwrap();
        assert_eq!(
            store.update_status(&task.id, TaskStatus::Completed).unwrap(),
            StatusUpdate::Unchanged
        );
        assert!(!store.path().exists());
        assert_eq!(store.get_task(&task.id).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn test_activate() {
        let (_temp, mut store) = open_temp();
        let task = store.add_task(NewTask::new("Focus")).unwrap();

        assert_eq!(store.activate(&task.id).unwrap(), StatusUpdate::Applied);
        assert_eq!(store.get_task(&task.id).unwrap().status, TaskStatus::Active);
        assert_eq!(store.activate(&task.id).unwrap(), StatusUpdate::Unchanged);
        assert_eq!(store.next_actionable_task().unwrap().id, task.id);

        store.update_status(&task.id, TaskStatus::Skipped).unwrap();
        assert_eq!(
            store.activate(&task.id).unwrap(),
            StatusUpdate::Rejected {
                from: TaskStatus::Skipped
            }
        );
        assert_eq!(store.activate("ghost").unwrap(), StatusUpdate::UnknownTask);
    }

    #[test]
    fn test_delete_cascades() {
        let (_temp, mut store) = open_temp();
        let keep = store.add_task(NewTask::new("Keep")).unwrap();
        let root = store.add_task(NewTask::new("Root")).unwrap();
        let child = store.add_task(NewTask::new("Child").with_parent(&root.id)).unwrap();
        let grandchild = store
            .add_task(NewTask::new("Grandchild").with_parent(&child.id))
            .unwrap();
        let sibling = store.add_task(NewTask::new("Sibling").with_parent(&root.id)).unwrap();

        let removed = store.delete_task(&root.id).unwrap();
        assert_eq!(removed, 4);
        for id in [&root.id, &child.id, &grandchild.id, &sibling.id] {
            assert!(store.get_task(id).is_none());
        }
        assert_eq!(store.root_task_ids(), &[keep.id.clone()]);
        assert!(store.check_forest().is_empty());
    }

    #[test]
    fn test_delete_child_detaches_from_parent() {
        let (_temp, mut store) = open_temp();
        let root = store.add_task(NewTask::new("Root")).unwrap();
        let a = store.add_task(NewTask::new("A").with_parent(&root.id)).unwrap();
        let b = store.add_task(NewTask::new("B").with_parent(&root.id)).unwrap();
        let a1 = store.add_task(NewTask::new("A1").with_parent(&a.id)).unwrap();

        assert_eq!(store.delete_task(&a.id).unwrap(), 2);
        assert!(store.get_task(&a1.id).is_none());
        assert_eq!(store.get_task(&root.id).unwrap().children_ids, vec![b.id.clone()]);
        assert!(store.check_forest().is_empty());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (_temp, mut store) = open_temp();
        store.add_task(NewTask::new("Stay")).unwrap();
        assert_eq!(store.delete_task("ghost").unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_children_in_order() {
        let (_temp, mut store) = open_temp();
        let parent = store.add_task(NewTask::new("Big thing")).unwrap();
        let created = store
            .append_children(
                &parent.id,
                vec![
                    NewTask::new("First"),
                    NewTask::new(""),
                    NewTask::new("Second").with_description("then this"),
                ],
            )
            .unwrap();

        let titles: Vec<_> = created.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
        let children = &store.get_task(&parent.id).unwrap().children_ids;
        assert_eq!(children, &vec![created[0].id.clone(), created[1].id.clone()]);
        assert_eq!(store.next_actionable_task().unwrap().title, "First");
    }

    #[test]
    fn test_append_children_to_deleted_or_resolved_parent() {
        let (_temp, mut store) = open_temp();
        let parent = store.add_task(NewTask::new("Gone soon")).unwrap();
        store.delete_task(&parent.id).unwrap();
        assert!(
            store
                .append_children(&parent.id, vec![NewTask::new("Late step")])
                .unwrap()
                .is_empty()
        );

        let done = store.add_task(NewTask::new("Finished")).unwrap();
        store.update_status(&done.id, TaskStatus::Completed).unwrap();
        assert!(
            store
                .append_children(&done.id, vec![NewTask::new("Late step")])
                .unwrap()
                .is_empty()
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let (_temp, mut store) = open_temp();
        let a = store.add_task(NewTask::new("A").with_description("first root")).unwrap();
        let b = store.add_task(NewTask::new("B")).unwrap();
        let a1 = store.add_task(NewTask::new("A1").with_parent(&a.id)).unwrap();
        let a2 = store.add_task(NewTask::new("A2").with_parent(&a.id)).unwrap();
        store.update_status(&a1.id, TaskStatus::Skipped).unwrap();
        store.update_status(&b.id, TaskStatus::Completed).unwrap();

        let reopened = TaskStore::open(store.path());
        assert_eq!(reopened.root_task_ids(), store.root_task_ids());
        assert_eq!(reopened.rows(), store.rows());
        assert_eq!(reopened.get_task(&a.id).unwrap().children_ids, vec![a1.id, a2.id]);
        assert!(reopened.check_forest().is_empty());
    }

    #[test]
    fn test_saved_file_is_pretty_and_parseable() {
        let (_temp, mut store) = open_temp();
        let task = store.add_task(NewTask::new("Check format")).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\n    \"tasks\""));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["root_task_ids"][0], task.id.as_str());
        assert_eq!(value["tasks"][0]["status"], "pending");
        assert!(value["tasks"][0]["parent_id"].is_null());
        assert_eq!(value["tasks"][0]["is_reward"], false);
    }

    #[test]
    fn test_load_repairs_dangling_references() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(
            &path,
            r#"{
                "tasks": [
                    {"id": "p", "title": "Parent", "description": "", "status": "pending",
                     "children_ids": ["gone", "c"], "parent_id": null, "is_reward": false},
                    {"id": "c", "title": "Child", "description": "", "status": "pending",
                     "children_ids": [], "parent_id": "p", "is_reward": false}
                ],
                "root_task_ids": ["p", "ghost"]
            }"#,
        )
        .unwrap();

        let store = TaskStore::open(&path);
        assert_eq!(store.root_task_ids(), &["p".to_string()]);
        assert_eq!(store.get_task("p").unwrap().children_ids, vec!["c".to_string()]);
        assert!(store.check_forest().is_empty());
        assert_eq!(store.next_actionable_task().unwrap().id, "c");
    }

    #[test]
    fn test_resolve_id() {
        let (_temp, mut store) = open_temp();
        let kitchen = store.add_task(NewTask::new("Clean kitchen")).unwrap();
        store.add_task(NewTask::new("Wash dishes")).unwrap();
        store.add_task(NewTask::new("Wash car")).unwrap();

        assert_eq!(store.resolve_id("kitchen").unwrap(), kitchen.id);
        assert_eq!(store.resolve_id(&kitchen.id).unwrap(), kitchen.id);
        assert!(matches!(store.resolve_id("wash"), Err(StateError::Ambiguous { .. })));
        assert!(matches!(store.resolve_id("laundry"), Err(StateError::NotFound(_))));
    }

    #[test]
    fn test_rows_preorder_with_depth() {
        let (_temp, mut store) = open_temp();
        let a = store.add_task(NewTask::new("A")).unwrap();
        let b = store.add_task(NewTask::new("B")).unwrap();
        let a1 = store.add_task(NewTask::new("A1").with_parent(&a.id)).unwrap();
        store.add_task(NewTask::new("A1x").with_parent(&a1.id)).unwrap();
        store.add_task(NewTask::new("B1").with_parent(&b.id)).unwrap();

        let rows: Vec<(String, usize)> = store.rows().into_iter().map(|r| (r.task.title, r.depth)).collect();
        assert_eq!(
            rows,
            vec![
                ("A".to_string(), 0),
                ("A1".to_string(), 1),
                ("A1x".to_string(), 2),
                ("B".to_string(), 0),
                ("B1".to_string(), 1),
            ]
        );
    }
}
