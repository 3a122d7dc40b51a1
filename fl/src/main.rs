//! FrontalLobe - one task at a time
//!
//! CLI entry point for the focus session and one-shot task commands.

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use frontallobe::breakdown::Orchestrator;
use frontallobe::cli::{Cli, Command, generate_after_help};
use frontallobe::config::Config;
use frontallobe::domain::NewTask;
use frontallobe::focus::{FocusSession, focus_card, tree_lines};
use frontallobe::i18n::Localizer;
use frontallobe::state::{StateManager, StatusUpdate};
use frontallobe::suggest::create_suggester;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logging isn't initialized yet, so problems go to stderr
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("frontallobe")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("frontallobe.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    if let Some(data_file) = cli.data_file {
        config.storage.data_file = data_file;
    }
    if let Some(language) = cli.language {
        config.language = language;
    }
    info!(data_file = %config.storage.data_file.display(), language = %config.language, "FrontalLobe starting");

    let state = StateManager::spawn(&config.storage.data_file);

    debug!(command = ?cli.command, "main: dispatching command");
    let result = match cli.command {
        None | Some(Command::Focus) => cmd_focus(&config, &state).await,
        Some(Command::Next) => cmd_next(&state).await,
        Some(Command::Add {
            title,
            description,
            parent,
            reward,
        }) => cmd_add(&state, &title.join(" "), description, parent.as_deref(), reward).await,
        Some(Command::List) => cmd_list(&state).await,
        Some(Command::Done { id }) => cmd_done(&state, &id).await,
        Some(Command::Skip { id }) => cmd_skip(&state, &id).await,
        Some(Command::Delete { id }) => cmd_delete(&state, &id).await,
        Some(Command::Breakdown { id }) => cmd_breakdown(&config, &state, &id).await,
        Some(Command::Block { id, reason }) => cmd_block(&config, &state, &id, &reason.join(" ")).await,
    };

    state.shutdown().await?;
    result
}

/// Run the interactive focus session
async fn cmd_focus(config: &Config, state: &StateManager) -> Result<()> {
    debug!("cmd_focus: called");
    let (orchestrator, outcomes) = Orchestrator::new(state.clone(), create_suggester(config));
    let l10n = Localizer::from_code(&config.language);

    println!("{}", "FrontalLobe".bright_cyan().bold());
    println!("Type {} for commands, {} to leave", "help".yellow(), "quit".yellow());

    FocusSession::new(state.clone(), orchestrator, outcomes, l10n, io::stdout())
        .run()
        .await
}

/// Print the task to work on now
async fn cmd_next(state: &StateManager) -> Result<()> {
    debug!("cmd_next: called");
    match state.next_actionable().await? {
        Some(task) => {
            for line in focus_card(&task) {
                println!("{}", line);
            }
            println!("  {}", task.id.dimmed());
        }
        None => println!("Nothing to do. All tasks are resolved."),
    }
    Ok(())
}

async fn cmd_add(
    state: &StateManager,
    title: &str,
    description: Option<String>,
    parent: Option<&str>,
    reward: bool,
) -> Result<()> {
    debug!(%title, ?parent, reward, "cmd_add: called");
    let mut new_task = NewTask::new(title);
    if let Some(description) = description {
        new_task = new_task.with_description(description);
    }
    if let Some(parent) = parent {
        new_task = new_task.with_parent(state.resolve_id(parent).await?);
    }
    if reward {
        new_task = new_task.reward();
    }

    let task = state.add_task(new_task).await.context("Failed to add task")?;
    println!("Added {} {}", task.short_id().dimmed(), task.title);
    Ok(())
}

/// Show the task forest
async fn cmd_list(state: &StateManager) -> Result<()> {
    debug!("cmd_list: called");
    let rows = state.list_rows().await?;
    if rows.is_empty() {
        println!("No tasks yet. Add one with: fl add <title>");
        return Ok(());
    }
    for line in tree_lines(&rows) {
        println!("{}", line);
    }
    Ok(())
}

async fn cmd_done(state: &StateManager, reference: &str) -> Result<()> {
    debug!(%reference, "cmd_done: called");
    let id = state.resolve_id(reference).await?;
    report_status(state.complete(&id).await?, &id, "completed");
    Ok(())
}

async fn cmd_skip(state: &StateManager, reference: &str) -> Result<()> {
    debug!(%reference, "cmd_skip: called");
    let id = state.resolve_id(reference).await?;
    report_status(state.skip(&id).await?, &id, "skipped");
    Ok(())
}

fn report_status(update: StatusUpdate, id: &str, verb: &str) {
    match update {
        StatusUpdate::Applied => println!("Task {} {}", id.dimmed(), verb),
        StatusUpdate::Unchanged => println!("Task {} was already {}", id.dimmed(), verb),
        StatusUpdate::UnknownTask => println!("Task {} not found", id),
        StatusUpdate::Rejected { from } => println!("Task {} is already {}", id, from),
    }
}

/// Delete a task and its subtree
async fn cmd_delete(state: &StateManager, reference: &str) -> Result<()> {
    debug!(%reference, "cmd_delete: called");
    let id = state.resolve_id(reference).await?;
    let removed = state.delete_task(&id).await?;
    println!("Deleted {} task(s)", removed);
    Ok(())
}

/// Split a task into suggested steps and wait for them
async fn cmd_breakdown(config: &Config, state: &StateManager, reference: &str) -> Result<()> {
    debug!(%reference, "cmd_breakdown: called");
    let task = state.get_task_required(&state.resolve_id(reference).await?).await?;
    let (orchestrator, _outcomes) = Orchestrator::new(state.clone(), create_suggester(config));
    let l10n = Localizer::from_code(&config.language);

    println!("{}", l10n.get("thinking").dimmed());
    let added = orchestrator.break_down_task(&task).await?;
    print_added(state, &task.id, added, l10n.get("error_break_down")).await
}

/// Get steps past whatever is blocking a task
async fn cmd_block(config: &Config, state: &StateManager, reference: &str, reason: &str) -> Result<()> {
    debug!(%reference, %reason, "cmd_block: called");
    let task = state.get_task_required(&state.resolve_id(reference).await?).await?;
    let (orchestrator, _outcomes) = Orchestrator::new(state.clone(), create_suggester(config));
    let l10n = Localizer::from_code(&config.language);

    println!("{}", l10n.get("thinking").dimmed());
    let added = orchestrator
        .resolve_block(&task, reason, l10n.locale())
        .await?;
    print_added(state, &task.id, added, l10n.get("error_resolve")).await
}

async fn print_added(state: &StateManager, task_id: &str, added: usize, failure: &str) -> Result<()> {
    if added == 0 {
        println!("{}", failure.red());
        return Ok(());
    }

    let task = state.get_task_required(task_id).await?;
    println!("{} {}", task.title.bold(), format!("(+{} steps)", added).green());
    for child_id in task.children_ids.iter().rev().take(added).rev() {
        if let Some(child) = state.get_task(child_id).await? {
            println!("  {} {} {}", "[ ]".dimmed(), child.short_id().dimmed(), child.title);
        }
    }
    Ok(())
}
