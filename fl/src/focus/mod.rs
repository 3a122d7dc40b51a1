//! Interactive focus session
//!
//! Shows one actionable task at a time, rewards finishing it, and lets the
//! user split a task or get past a blocker with suggested steps.

mod command;
mod render;
mod session;

pub use command::FocusCommand;
pub use render::{focus_card, status_marker, tree_lines};
pub use session::{Flow, FocusSession, Mode};
