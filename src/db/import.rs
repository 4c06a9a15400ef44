//! Import of the standalone `history.db` file kept by older releases.
//!
//! Layout: `history(id, date, start, end, duration TEXT)` where duration
//! reads like `"25 min"`.

use crate::db::migrate::table_exists;
use crate::db::queries::insert_session;
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use crate::models::session_source::SessionSource;
use crate::utils::{date::parse_date, time::parse_time};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// `"25 min"` → 25
pub fn parse_legacy_duration(raw: &str) -> Option<i64> {
    raw.split_whitespace().next()?.parse().ok()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

pub fn import_legacy_history(conn: &mut Connection, legacy_path: &Path) -> AppResult<ImportReport> {
    if !legacy_path.exists() {
        return Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("History file not found: {}", legacy_path.display()),
        )));
    }

    let legacy = Connection::open_with_flags(legacy_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    if !table_exists(&legacy, "history")? {
        return Err(AppError::Migration(format!(
            "{} has no history table",
            legacy_path.display()
        )));
    }

    let rows: Vec<(String, String, String, String)> = {
        let mut stmt = legacy.prepare("SELECT date, start, end, duration FROM history ORDER BY id ASC")?;
        let mapped = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            ))
        })?;
        mapped.collect::<rusqlite::Result<_>>()?
    };

    let mut report = ImportReport::default();
    let tx = conn.transaction()?;

    for (date, start, end, duration) in rows {
        let parsed = (
            parse_date(&date),
            parse_time(&start),
            parse_time(&end),
            parse_legacy_duration(&duration),
        );

        match parsed {
            (Some(d), Some(s), Some(e), Some(minutes)) => {
                insert_session(&tx, &Session::new(d, s, e, minutes, SessionSource::Import))?;
                report.imported += 1;
            }
            _ => {
                log::warn!("skipping legacy history row {date} {start}-{end} ({duration})");
                report.skipped += 1;
            }
        }
    }

    tx.commit()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_duration_text() {
        assert_eq!(parse_legacy_duration("25 min"), Some(25));
        assert_eq!(parse_legacy_duration("  5 min"), Some(5));
        assert_eq!(parse_legacy_duration("abc"), None);
        assert_eq!(parse_legacy_duration(""), None);
    }
}
