//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Frontallobe - one task at a time
#[derive(Parser)]
#[command(
    name = "fl",
    about = "Focus helper that shows one actionable task at a time",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Task state file (overrides storage.data-file)
    #[arg(long = "data-file", global = true, help = "Task state file")]
    pub data_file: Option<PathBuf>,

    /// Language for messages and suggestions (overrides config)
    #[arg(long, global = true, help = "Language (en, sv)")]
    pub language: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Interactive focus session (default)
    Focus,

    /// Print the task to work on now
    Next,

    /// Add a task
    Add {
        /// Task title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Parent task (id, id prefix or title words)
        #[arg(short, long)]
        parent: Option<String>,

        /// Mark as a reward task
        #[arg(long)]
        reward: bool,
    },

    /// Show the task forest
    List,

    /// Mark a task completed
    Done {
        /// Task reference
        id: String,
    },

    /// Skip a task
    Skip {
        /// Task reference
        id: String,
    },

    /// Delete a task and everything under it
    Delete {
        /// Task reference
        id: String,
    },

    /// Split a task into suggested steps
    Breakdown {
        /// Task reference
        id: String,
    },

    /// Get steps past whatever is blocking a task
    Block {
        /// Task reference
        id: String,

        /// What is in the way
        #[arg(required = true, num_args = 1..)]
        reason: Vec<String>,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("frontallobe")
        .join("logs")
        .join("frontallobe.log")
}

/// Help footer pointing at the log file
pub fn generate_after_help() -> String {
    format!("Logs are written to: {}", get_log_path().display())
}
