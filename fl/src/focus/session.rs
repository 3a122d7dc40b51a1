//! Focus session - one task at a time
//!
//! Line input is read on a dedicated thread so that breakdown results can be
//! applied while the user sits at the prompt. Every state change happens on
//! the session's own task.

use std::io::Write;
use std::thread;

use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::breakdown::{BreakdownError, BreakdownKind, BreakdownOutcome, Orchestrator};
use crate::domain::{NewTask, Task, TaskId};
use crate::i18n::Localizer;
use crate::state::{StateError, StateEvent, StateManager, StatusUpdate};

use super::command::FocusCommand;
use super::render;

/// What the next input line means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Showing the current task, waiting for a command
    Focus,
    /// Reward screen after finishing a task; any input continues
    Reward,
    /// Waiting for the reason the user is blocked on a task
    BlockReason(TaskId),
    /// Waiting for a new task's title
    NewTitle,
}

/// Whether to keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A line read from the terminal
#[derive(Debug)]
enum Input {
    Line(String),
    Interrupted,
    Eof,
    Failed(String),
}

/// Interactive focus session
pub struct FocusSession<W: Write> {
    state: StateManager,
    orchestrator: Orchestrator,
    outcomes: mpsc::Receiver<BreakdownOutcome>,
    /// State changes, used to redraw the card when its task changes
    events: broadcast::Receiver<StateEvent>,
    l10n: Localizer,
    mode: Mode,
    current: Option<Task>,
    out: W,
}

impl<W: Write> FocusSession<W> {
    pub fn new(
        state: StateManager,
        orchestrator: Orchestrator,
        outcomes: mpsc::Receiver<BreakdownOutcome>,
        l10n: Localizer,
        out: W,
    ) -> Self {
        let events = state.subscribe_events();
        Self {
            state,
            orchestrator,
            outcomes,
            events,
            l10n,
            mode: Mode::Focus,
            current: None,
            out,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The task currently on screen
    pub fn current(&self) -> Option<&Task> {
        self.current.as_ref()
    }

    /// The output sink
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Prompt matching the current mode
    pub fn prompt(&self) -> String {
        match &self.mode {
            Mode::Focus => format!("{} ", ">".bright_green()),
            Mode::Reward => format!("{} ", self.l10n.get("ready_again").bright_green()),
            Mode::BlockReason(_) => format!("{} ", self.l10n.get("what_blocking").yellow()),
            Mode::NewTitle => format!("{} ", self.l10n.get("new_task_prompt").yellow()),
        }
    }

    /// Run the session until the user quits
    pub async fn run(mut self) -> Result<()> {
        info!("Focus session started");
        self.show_next().await?;

        let (prompt_tx, mut line_rx) = spawn_reader();

        'session: loop {
            if prompt_tx.send(self.prompt()).await.is_err() {
                break;
            }

            // Apply finished breakdowns while waiting for the line
            let input = loop {
                tokio::select! {
                    input = line_rx.recv() => break input.unwrap_or(Input::Eof),
                    Some(outcome) = self.outcomes.recv() => {
                        writeln!(self.out)?;
                        self.handle_outcome(outcome).await?;
                        write!(self.out, "{}", self.prompt())?;
                        self.out.flush()?;
                    }
                    Ok(event) = self.events.recv() => {
                        let redrawn = match self.handle_event(event).await {
                            Ok(redrawn) => redrawn,
                            Err(e) => self.report_state_error(e).map(|()| true)?,
                        };
                        if redrawn {
                            write!(self.out, "{}", self.prompt())?;
                            self.out.flush()?;
                        }
                    }
                }
            };

            match input {
                Input::Line(line) => {
                    if self.handle_line(&line).await? == Flow::Quit {
                        break 'session;
                    }
                }
                Input::Interrupted => {
                    writeln!(self.out, "^C")?;
                    self.mode = Mode::Focus;
                }
                Input::Eof => {
                    writeln!(self.out)?;
                    break 'session;
                }
                Input::Failed(e) => return Err(eyre::eyre!("Readline error: {}", e)),
            }
        }

        info!("Focus session ended");
        Ok(())
    }

    /// Handle one line of input in the current mode
    ///
    /// A failed task update is reported and the session keeps going.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        debug!(mode = ?self.mode, %line, "handle_line: called");
        match self.dispatch_line(line.trim()).await {
            Err(e) => self.report_state_error(e).map(|()| Flow::Continue),
            flow => flow,
        }
    }

    /// Print a task update failure; anything else ends the session
    fn report_state_error(&mut self, e: eyre::Report) -> Result<()> {
        match e.downcast_ref::<StateError>() {
            Some(StateError::ChannelError) | None => Err(e),
            Some(state_err) => {
                warn!(error = %state_err, "Task update failed");
                writeln!(self.out, "{} {}", "!".red(), state_err.to_string().red())?;
                self.mode = Mode::Focus;
                Ok(())
            }
        }
    }

    async fn dispatch_line(&mut self, line: &str) -> Result<Flow> {
        match std::mem::replace(&mut self.mode, Mode::Focus) {
            Mode::Reward => {
                self.show_next().await?;
                Ok(Flow::Continue)
            }
            Mode::BlockReason(task_id) => {
                if line.is_empty() {
                    self.show_next().await?;
                } else {
                    self.request_resolve_block(&task_id, line).await?;
                }
                Ok(Flow::Continue)
            }
            Mode::NewTitle => {
                if !line.is_empty() {
                    self.add_task(line).await?;
                }
                self.show_next().await?;
                Ok(Flow::Continue)
            }
            Mode::Focus => {
                if line.is_empty() {
                    return Ok(Flow::Continue);
                }
                self.handle_command(FocusCommand::parse(line)).await
            }
        }
    }

    async fn handle_command(&mut self, command: FocusCommand) -> Result<Flow> {
        debug!(?command, "handle_command: called");
        match command {
            FocusCommand::Done => {
                if let Some(task) = self.current.take() {
                    if self.state.complete(&task.id).await? == StatusUpdate::Applied {
                        info!(task_id = %task.id, "Task completed");
                        self.show_reward()?;
                        return Ok(Flow::Continue);
                    }
                }
                self.show_next().await?;
            }
            FocusCommand::Skip => {
                if let Some(task) = self.current.take() {
                    self.state.skip(&task.id).await?;
                    info!(task_id = %task.id, "Task skipped");
                }
                self.show_next().await?;
            }
            FocusCommand::Block(reason) => match (self.current.clone(), reason) {
                (Some(task), Some(reason)) => self.request_resolve_block(&task.id, &reason).await?,
                (Some(task), None) => self.mode = Mode::BlockReason(task.id),
                (None, _) => self.show_next().await?,
            },
            FocusCommand::Split => match self.current.clone() {
                Some(task) => {
                    let result = self.orchestrator.spawn_break_down(&task);
                    self.report_spawn(result)?;
                }
                None => self.show_next().await?,
            },
            FocusCommand::Add(Some(title)) => {
                self.add_task(&title).await?;
                self.show_next().await?;
            }
            FocusCommand::Add(None) => self.mode = Mode::NewTitle,
            FocusCommand::List => {
                for line in render::tree_lines(&self.state.list_rows().await?) {
                    writeln!(self.out, "{}", line)?;
                }
            }
            FocusCommand::Help => self.print_help()?,
            FocusCommand::Quit => return Ok(Flow::Quit),
            FocusCommand::Unknown(input) => {
                writeln!(self.out, "{} Unknown command: {}", "?".yellow(), input)?;
                writeln!(self.out, "Type {} for available commands", "help".yellow())?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Apply a finished breakdown on the session's own task
    pub async fn handle_outcome(&mut self, outcome: BreakdownOutcome) -> Result<usize> {
        debug!(task_id = %outcome.task_id, "handle_outcome: called");
        let kind = outcome.kind.clone();
        let added = match self.orchestrator.apply(outcome).await {
            Ok(added) => added,
            Err(e) => {
                warn!(error = %e, "Failed to apply suggested steps");
                0
            }
        };

        if added == 0 {
            let key = match kind {
                BreakdownKind::BreakDown => "error_break_down",
                BreakdownKind::ResolveBlock { .. } => "error_resolve",
            };
            writeln!(self.out, "{}", self.l10n.get(key).red())?;
        } else {
            // The card is redrawn when the ChildrenAppended event arrives
            writeln!(self.out, "{}", self.l10n.get("steps_added").green())?;
        }
        Ok(added)
    }

    /// Redraw the card when a state change touches the task on screen
    ///
    /// Returns whether the card was redrawn. Prompts and the reward screen
    /// are left alone.
    pub async fn handle_event(&mut self, event: StateEvent) -> Result<bool> {
        debug!(?event, "handle_event: called");
        if self.mode != Mode::Focus {
            return Ok(false);
        }

        let shown = self.current.as_ref().map(|task| task.id.clone());
        let stale = match (&event, shown) {
            (StateEvent::ChildrenAppended { parent_id, .. }, Some(shown)) => *parent_id == shown,
            (StateEvent::StatusChanged { id, status }, Some(shown)) => *id == shown && status.is_resolved(),
            // Deleting an ancestor takes the shown task with it
            (StateEvent::TaskDeleted { .. }, Some(shown)) => self.state.get_task(&shown).await?.is_none(),
            (StateEvent::TaskAdded { .. }, None) => true,
            _ => false,
        };

        if stale {
            writeln!(self.out)?;
            self.show_next().await?;
        }
        Ok(stale)
    }

    async fn request_resolve_block(&mut self, task_id: &str, reason: &str) -> Result<()> {
        let Some(task) = self.state.get_task(task_id).await? else {
            return self.show_next().await;
        };
        let result = self.orchestrator.spawn_resolve_block(&task, reason, self.l10n.locale());
        self.report_spawn(result)
    }

    fn report_spawn(&mut self, result: Result<(), BreakdownError>) -> Result<()> {
        match result {
            Ok(()) => writeln!(self.out, "{}", self.l10n.get("thinking").dimmed())?,
            Err(BreakdownError::InFlight(_)) => writeln!(self.out, "{}", self.l10n.get("busy").yellow())?,
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    async fn add_task(&mut self, title: &str) -> Result<()> {
        let task = self
            .state
            .add_task(NewTask::new(title))
            .await
            .context("Failed to add task")?;
        info!(task_id = %task.id, "Task added from focus session");
        Ok(())
    }

    /// Recompute and show the task to work on now
    pub async fn show_next(&mut self) -> Result<()> {
        self.mode = Mode::Focus;
        self.current = self.state.next_actionable().await?;

        match &self.current {
            Some(task) => {
                self.state.activate(&task.id).await?;
                for line in render::focus_card(task) {
                    writeln!(self.out, "{}", line)?;
                }
                writeln!(
                    self.out,
                    "  {} {}   {} {}   {} {}   {} {}   {} {}",
                    "d".yellow(),
                    self.l10n.get("done"),
                    "s".yellow(),
                    self.l10n.get("skip"),
                    "b".yellow(),
                    self.l10n.get("blocked"),
                    "x".yellow(),
                    self.l10n.get("split"),
                    "a".yellow(),
                    self.l10n.get("add_task"),
                )?;
            }
            None => {
                writeln!(self.out)?;
                writeln!(self.out, "  {}", self.l10n.get("no_tasks").bright_green().bold())?;
                writeln!(self.out, "  {} {}", "a".yellow(), self.l10n.get("add_new_task"))?;
            }
        }
        Ok(())
    }

    fn show_reward(&mut self) -> Result<()> {
        self.mode = Mode::Reward;
        writeln!(self.out)?;
        writeln!(self.out, "  {}", self.l10n.get("great_job").bright_magenta().bold())?;
        writeln!(self.out, "  {}", self.l10n.get("reward_desc"))?;
        writeln!(self.out, "  {}", self.l10n.get("earned_it"))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn print_help(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Available Commands:".bright_cyan())?;
        writeln!(self.out, "  {:14} Mark the task done", "d, done".yellow())?;
        writeln!(self.out, "  {:14} Skip the task", "s, skip".yellow())?;
        writeln!(self.out, "  {:14} Get steps past a blocker", "b, block".yellow())?;
        writeln!(self.out, "  {:14} Break the task into steps", "x, split".yellow())?;
        writeln!(self.out, "  {:14} Add a new task", "a, add".yellow())?;
        writeln!(self.out, "  {:14} Show all tasks", "l, list".yellow())?;
        writeln!(self.out, "  {:14} Leave", "q, quit".yellow())?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Read lines on a plain thread; each prompt sent yields one `Input`
fn spawn_reader() -> (mpsc::Sender<String>, mpsc::Receiver<Input>) {
    let (prompt_tx, mut prompt_rx) = mpsc::channel::<String>(1);
    let (line_tx, line_rx) = mpsc::channel(1);

    thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                let _ = line_tx.blocking_send(Input::Failed(e.to_string()));
                return;
            }
        };

        while let Some(prompt) = prompt_rx.blocking_recv() {
            let input = match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.trim());
                    }
                    Input::Line(line)
                }
                Err(ReadlineError::Interrupted) => Input::Interrupted,
                Err(ReadlineError::Eof) => Input::Eof,
                Err(e) => Input::Failed(e.to_string()),
            };
            if line_tx.blocking_send(input).is_err() {
                break;
            }
        }
        debug!("spawn_reader: input thread stopped");
    });

    (prompt_tx, line_rx)
}
