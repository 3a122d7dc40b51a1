//! Focus session input parsing

/// A command typed in the focus session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusCommand {
    Done,
    Skip,
    /// Blocked, with the reason if given inline
    Block(Option<String>),
    Split,
    /// Add a root task, with the title if given inline
    Add(Option<String>),
    List,
    Help,
    Quit,
    Unknown(String),
}

impl FocusCommand {
    /// Parse one input line; the first word selects the command
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let rest = (!rest.is_empty()).then(|| rest.to_string());

        match word.to_lowercase().as_str() {
            "d" | "done" => FocusCommand::Done,
            "s" | "skip" => FocusCommand::Skip,
            "b" | "block" | "blocked" => FocusCommand::Block(rest),
            "x" | "split" | "breakdown" => FocusCommand::Split,
            "a" | "add" => FocusCommand::Add(rest),
            "l" | "ls" | "list" => FocusCommand::List,
            "h" | "?" | "help" => FocusCommand::Help,
            "q" | "quit" | "exit" => FocusCommand::Quit,
            _ => FocusCommand::Unknown(line.to_string()),
        }
    }
}
