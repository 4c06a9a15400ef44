use clap::ValueEnum;
use serde::Serialize;

use crate::config::Config;

/// The three interval types of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Pomodoro,
    #[value(name = "break")]
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Pomodoro => "Pomodoro",
            SessionKind::ShortBreak => "Short break",
            SessionKind::LongBreak => "Long break",
        }
    }

    /// Configured length of this interval, in minutes.
    pub fn minutes(&self, cfg: &Config) -> u32 {
        match self {
            SessionKind::Pomodoro => cfg.pomodoro_minutes,
            SessionKind::ShortBreak => cfg.short_break_minutes,
            SessionKind::LongBreak => cfg.long_break_minutes,
        }
    }

    /// Only focus intervals end up in the session log.
    pub fn is_focus(&self) -> bool {
        matches!(self, SessionKind::Pomodoro)
    }
}
