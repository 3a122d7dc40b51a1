//! Forest invariant checking and repair
//!
//! Every task is owned exactly once: by the root list when `parent_id` is
//! `None`, otherwise by its parent's `children_ids`. No dangling ids, no cycles.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Task, TaskId};

/// A broken forest invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestViolation {
    #[error("root list references unknown task {0}")]
    DanglingRoot(TaskId),

    #[error("task {parent} lists unknown child {child}")]
    DanglingChild { parent: TaskId, child: TaskId },

    #[error("task {id} is owned {count} times")]
    MultipleOwners { id: TaskId, count: usize },

    #[error("task {0} has no owner")]
    Unowned(TaskId),

    #[error("task {id} has parent_id {parent_id:?} but is owned by {owner:?}")]
    ParentMismatch {
        id: TaskId,
        parent_id: Option<TaskId>,
        owner: Option<TaskId>,
    },

    #[error("task {0} is not reachable from any root")]
    Unreachable(TaskId),
}

/// Check the forest invariants, returning every violation found
pub fn check(tasks: &HashMap<TaskId, Task>, root_ids: &[TaskId]) -> Vec<ForestViolation> {
    let mut violations = Vec::new();
    // id -> owners (None = root list)
    let mut owners: HashMap<&str, Vec<Option<&str>>> = HashMap::new();

    for id in root_ids {
        if tasks.contains_key(id) {
            owners.entry(id.as_str()).or_default().push(None);
        } else {
            violations.push(ForestViolation::DanglingRoot(id.clone()));
        }
    }

    for task in tasks.values() {
        for child in &task.children_ids {
            if tasks.contains_key(child) {
                owners.entry(child.as_str()).or_default().push(Some(task.id.as_str()));
            } else {
                violations.push(ForestViolation::DanglingChild {
                    parent: task.id.clone(),
                    child: child.clone(),
                });
            }
        }
    }

    for task in tasks.values() {
        match owners.get(task.id.as_str()).map(Vec::as_slice) {
            None | Some([]) => violations.push(ForestViolation::Unowned(task.id.clone())),
            Some([owner]) => {
                if task.parent_id.as_deref() != *owner {
                    violations.push(ForestViolation::ParentMismatch {
                        id: task.id.clone(),
                        parent_id: task.parent_id.clone(),
                        owner: (*owner).map(String::from),
                    });
                }
            }
            Some(many) => violations.push(ForestViolation::MultipleOwners {
                id: task.id.clone(),
                count: many.len(),
            }),
        }
    }

    // Cycles show up as tasks no root can reach
    let mut reachable: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = root_ids.iter().map(String::as_str).collect();
    while let Some(id) = stack.pop() {
        if !reachable.insert(id) {
            continue;
        }
        if let Some(task) = tasks.get(id) {
            stack.extend(task.children_ids.iter().map(String::as_str));
        }
    }
    for id in tasks.keys() {
        if !reachable.contains(id.as_str()) {
            violations.push(ForestViolation::Unreachable(id.clone()));
        }
    }

    violations
}

/// Repair a loaded forest in place, returning the number of fixes applied
///
/// Roots keep their order and each tree keeps its child order. Dangling and
/// duplicate references are dropped. Tasks nobody reachable owns are promoted
/// to roots, preferring those whose recorded parent is gone.
pub fn repair(tasks: &mut HashMap<TaskId, Task>, root_ids: &mut Vec<TaskId>) -> usize {
    debug!(task_count = tasks.len(), root_count = root_ids.len(), "repair: called");
    let mut fixes = 0;

    let mut seen = HashSet::new();
    root_ids.retain(|id| {
        let keep = tasks.contains_key(id) && seen.insert(id.clone());
        if !keep {
            warn!(%id, "repair: dropping dangling or duplicate root id");
            fixes += 1;
        }
        keep
    });
    let declared_roots: HashSet<TaskId> = root_ids.iter().cloned().collect();

    let mut visited: HashSet<TaskId> = HashSet::new();
    let mut walked = 0;
    loop {
        while walked < root_ids.len() {
            let root = root_ids[walked].clone();
            walked += 1;
            visited.insert(root.clone());
            fixes += claim_subtree(tasks, &root, None, &declared_roots, &mut visited);
        }

        let mut orphans: Vec<&Task> = tasks.values().filter(|t| !visited.contains(&t.id)).collect();
        if orphans.is_empty() {
            break;
        }
        orphans.sort_by(|a, b| a.id.cmp(&b.id));
        let promoted = orphans
            .iter()
            .find(|t| t.parent_id.as_ref().is_none_or(|p| !tasks.contains_key(p)))
            .unwrap_or(&orphans[0])
            .id
            .clone();
        warn!(id = %promoted, "repair: promoting orphaned task to root");
        root_ids.push(promoted);
        fixes += 1;
    }

    fixes
}

/// Take ownership of a subtree, fixing parent links and dropping bad child ids
fn claim_subtree(
    tasks: &mut HashMap<TaskId, Task>,
    id: &str,
    parent: Option<&str>,
    declared_roots: &HashSet<TaskId>,
    visited: &mut HashSet<TaskId>,
) -> usize {
    let mut fixes = 0;

    let children = match tasks.get_mut(id) {
        Some(task) => {
            if task.parent_id.as_deref() != parent {
                debug!(%id, ?parent, "claim_subtree: rewriting parent_id");
                task.parent_id = parent.map(String::from);
                fixes += 1;
            }
            std::mem::take(&mut task.children_ids)
        }
        None => return 0,
    };

    let mut kept = Vec::with_capacity(children.len());
    for child in children {
        if tasks.contains_key(&child) && !declared_roots.contains(&child) && visited.insert(child.clone()) {
            kept.push(child);
        } else {
            warn!(parent = %id, %child, "claim_subtree: dropping dangling or duplicate child id");
            fixes += 1;
        }
    }

    if let Some(task) = tasks.get_mut(id) {
        task.children_ids = kept.clone();
    }

    for child in &kept {
        fixes += claim_subtree(tasks, child, Some(id), declared_roots, visited);
    }

    fixes
}
