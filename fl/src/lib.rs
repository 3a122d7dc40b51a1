//! FrontalLobe - one task at a time
//!
//! A focus helper for people who stall on big tasks. Tasks form a forest;
//! the user only ever sees the single next actionable leaf. Any task can be
//! split into smaller steps, or unblocked, by a suggestion service that runs
//! in the background while the session stays responsive.
//!
//! # Modules
//!
//! - [`domain`] - Task entity and status rules
//! - [`state`] - JSON task store behind an actor handle, actionability resolver
//! - [`suggest`] - Step suggestions (LLM-backed or offline)
//! - [`llm`] - Chat-completions client
//! - [`breakdown`] - Background suggestion calls and result hand-off
//! - [`focus`] - Interactive focus session
//! - [`i18n`] - UI strings in English and Swedish
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod breakdown;
pub mod cli;
pub mod config;
pub mod domain;
pub mod focus;
pub mod i18n;
pub mod llm;
pub mod state;
pub mod suggest;

// Re-export commonly used types
pub use breakdown::{BreakdownError, BreakdownKind, BreakdownOutcome, Orchestrator};
pub use config::{Config, LlmConfig, StorageConfig};
pub use domain::{NewTask, Task, TaskId, TaskStatus};
pub use focus::FocusSession;
pub use i18n::{Language, Localizer};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use state::{StateError, StateEvent, StateManager, StateResponse, StatusUpdate, TaskRow, TaskStore, next_actionable};
pub use suggest::{MockSuggester, SuggestedStep, Suggester, create_suggester};
