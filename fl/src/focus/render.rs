//! Terminal rendering of tasks

use colored::Colorize;

use crate::domain::{Task, TaskStatus};
use crate::state::TaskRow;

/// Status marker for listings
pub fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::Active => "[>]",
        TaskStatus::Completed => "[x]",
        TaskStatus::Skipped => "[-]",
    }
}

/// One indented line per task, in forest order
pub fn tree_lines(rows: &[TaskRow]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let task = &row.task;
            let indent = "  ".repeat(row.depth);
            let marker = status_marker(task.status);
            let title = match task.status {
                TaskStatus::Completed | TaskStatus::Skipped => task.title.dimmed().to_string(),
                TaskStatus::Active => task.title.bright_white().bold().to_string(),
                TaskStatus::Pending => task.title.clone(),
            };
            let reward = if task.is_reward { " *" } else { "" };
            format!("{}{} {} {}{}", indent, marker, task.short_id().dimmed(), title, reward)
        })
        .collect()
}

/// The single task shown in focus
pub fn focus_card(task: &Task) -> Vec<String> {
    let mut lines = vec![String::new(), format!("  {}", task.title.bright_white().bold())];
    if !task.description.is_empty() {
        lines.push(format!("  {}", task.description.dimmed()));
    }
    lines.push(String::new());
    lines
}
