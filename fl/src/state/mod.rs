//! Task state with actor pattern
//!
//! StateManager owns the TaskStore and processes messages via channels,
//! providing serialized access to the persisted task forest.

mod forest;
mod manager;
mod messages;
mod resolver;
mod store;

pub use forest::ForestViolation;
pub use manager::{StateEvent, StateManager};
pub use messages::{StateCommand, StateError, StateResponse};
pub use resolver::next_actionable;
pub use store::{StatusUpdate, TaskRow, TaskStore};
