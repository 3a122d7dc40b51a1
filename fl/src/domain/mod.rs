//! Domain types for FrontalLobe
//!
//! The task entity, its status state machine and id handling.

mod id;
mod task;

pub use id::{IdResolver, generate_id};
pub use task::{NewTask, Task, TaskId, TaskStatus};
