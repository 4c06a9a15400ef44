use super::session_source::SessionSource;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: i64,
    pub date: NaiveDate,       // ⇔ sessions.date (TEXT "YYYY-MM-DD")
    pub start_time: NaiveTime, // ⇔ sessions.start_time (TEXT "HH:MM")
    pub end_time: NaiveTime,   // ⇔ sessions.end_time (TEXT "HH:MM")
    pub duration: i64,         // ⇔ sessions.duration (INT, minutes)
    pub source: SessionSource, // ⇔ sessions.source ('timer' | 'manual' | 'import')
}

impl Session {
    /// New, not yet persisted session (`id = 0`).
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        duration: i64,
        source: SessionSource,
    ) -> Self {
        Self {
            id: 0,
            date,
            start_time,
            end_time,
            duration,
            source,
        }
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn start_str(&self) -> String {
        self.start_time.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end_time.format("%H:%M").to_string()
    }

    /// History line: `2025-06-18 09:00 - 09:25 (25 min)`
    pub fn history_line(&self) -> String {
        format!(
            "{} {} - {} ({} min)",
            self.date_str(),
            self.start_str(),
            self.end_str(),
            self.duration
        )
    }
}
