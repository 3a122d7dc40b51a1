//! Breakdown orchestration
//!
//! Turns a stuck or oversized task into sub-steps. The suggestion call runs
//! on a background tokio task; splicing the result into the forest always
//! goes through the `StateManager`, which owns the store.

mod orchestrator;

pub use orchestrator::{BreakdownError, BreakdownKind, BreakdownOutcome, Orchestrator};
