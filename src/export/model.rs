// src/export/model.rs

use crate::models::session::Session;
use serde::Serialize;

/// Flat, string-typed row used for CSV and JSON output.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SessionExport {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: i64,
    pub source: String,
}

impl From<&Session> for SessionExport {
    fn from(s: &Session) -> Self {
        Self {
            id: s.id,
            date: s.date_str(),
            start_time: s.start_str(),
            end_time: s.end_str(),
            duration: s.duration,
            source: s.source.to_db_str().to_string(),
        }
    }
}
