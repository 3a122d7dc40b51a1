//! Actionability resolver
//!
//! Picks the single task the user should work on next. Roots are tried in
//! stored order; within a tree the walk is depth-first, children left to
//! right, and the first open task with no open descendants wins.

use std::collections::{HashMap, HashSet};

use crate::domain::{Task, TaskId};

/// Find the next actionable task in the forest
///
/// Returns `None` when the forest is empty or fully resolved.
pub fn next_actionable<'a>(tasks: &'a HashMap<TaskId, Task>, root_ids: &[TaskId]) -> Option<&'a Task> {
    let mut visited = HashSet::new();
    root_ids
        .iter()
        .find_map(|id| find_next_in_subtree(tasks, id, &mut visited))
}

/// Search one subtree
///
/// A resolved task prunes its whole subtree. An open container whose children
/// are all resolved surfaces itself so the user can close it explicitly.
fn find_next_in_subtree<'a>(
    tasks: &'a HashMap<TaskId, Task>,
    id: &str,
    visited: &mut HashSet<&'a str>,
) -> Option<&'a Task> {
    let task = tasks.get(id)?;

    // Guards against cycles in hand-edited state files
    if !visited.insert(task.id.as_str()) {
        return None;
    }

    if task.status.is_resolved() {
        return None;
    }

    for child_id in &task.children_ids {
        if let Some(found) = find_next_in_subtree(tasks, child_id, visited) {
            return Some(found);
        }
    }

    Some(task)
}
