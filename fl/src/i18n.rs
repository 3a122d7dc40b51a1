//! Message catalogue for the focus session

use std::fmt;
use std::str::FromStr;

use tracing::debug;

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Sv,
}

impl Language {
    /// Language code as sent to the suggestion service
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sv => "sv",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => EN,
            Language::Sv => SV,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "sv" | "swedish" | "svenska" => Ok(Language::Sv),
            other => Err(format!("Unsupported language: '{}'", other)),
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("no_tasks", "No tasks! You are free."),
    ("add_task", "Add Task"),
    ("add_new_task", "Add New Task"),
    ("done", "Done"),
    ("blocked", "I feel blocked"),
    ("skip", "Skip"),
    ("split", "Break it down"),
    ("what_blocking", "What is blocking you?"),
    ("thinking", "Thinking... Please wait."),
    ("error_resolve", "Could not resolve block."),
    ("error_break_down", "Could not break down task."),
    ("great_job", "Great Job! 💪"),
    ("reward_desc", "Do whatever you want for a while."),
    ("earned_it", "You earned it! 🎉"),
    ("ready_again", "I am ready again!"),
    ("new_task_prompt", "What do you need to do?"),
    ("new_task_title", "New Task"),
    ("steps_added", "New steps added."),
    ("busy", "Still working on that one..."),
];

const SV: &[(&str, &str)] = &[
    ("no_tasks", "Inga uppgifter! Du är fri."),
    ("add_task", "Lägg till uppgift"),
    ("add_new_task", "Lägg till ny uppgift"),
    ("done", "Klar"),
    ("blocked", "Jag känner mig blockerad"),
    ("skip", "Hoppa över"),
    ("split", "Dela upp"),
    ("what_blocking", "Vad blockerar dig?"),
    ("thinking", "Tänker... Vänta."),
    ("error_resolve", "Kunde inte lösa blockeringen."),
    ("error_break_down", "Kunde inte dela upp uppgiften."),
    ("great_job", "Bra jobbat! 💪"),
    ("reward_desc", "Gör vad du vill en stund."),
    ("earned_it", "Du förtjänar det! 🎉"),
    ("ready_again", "Jag är redo igen!"),
    ("new_task_prompt", "Vad behöver du göra?"),
    ("new_task_title", "Ny uppgift"),
    ("steps_added", "Nya steg tillagda."),
    ("busy", "Jobbar fortfarande på den..."),
];

/// Looks up UI strings for one language
///
/// The configured locale code is kept as given even when the catalogue falls
/// back to English; suggestion replies are requested in that locale.
#[derive(Debug, Clone)]
pub struct Localizer {
    language: Language,
    locale: String,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            locale: language.code().to_string(),
        }
    }

    /// Build from a configured language code; unknown codes use English strings
    pub fn from_code(code: &str) -> Self {
        let language = code.parse().unwrap_or_else(|e| {
            debug!(error = %e, "Localizer::from_code: falling back to English strings");
            Language::En
        });
        let locale = code.trim().to_lowercase();
        Self {
            language,
            locale: if locale.is_empty() { language.code().to_string() } else { locale },
        }
    }

    /// Catalogue used for UI strings
    pub fn language(&self) -> Language {
        self.language
    }

    /// Locale code for suggestion replies
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.locale = language.code().to_string();
    }

    /// Translate `key`, falling back to English and then to the key itself
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.language.table(), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
