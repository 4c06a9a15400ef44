use crate::db::log::ttlog_soft;
use crate::db::queries::{insert_session, load_sessions};
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use crate::models::session_source::SessionSource;
use crate::utils::date::{parse_range, require_date};
use crate::utils::time::{minutes_between, require_time};
use rusqlite::Connection;

/// High-level logic behind `add` and `list`.
pub struct SessionLogic;

impl SessionLogic {
    /// Record a session typed in by hand.
    pub fn add_manual(conn: &Connection, date: &str, start: &str, end: &str) -> AppResult<Session> {
        let date = require_date(date)?;
        let start = require_time(start)?;
        let end = require_time(end)?;

        if end < start {
            return Err(AppError::InvalidSession(format!(
                "end {} is before start {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            )));
        }

        let mut session = Session::new(
            date,
            start,
            end,
            minutes_between(start, end),
            SessionSource::Manual,
        );
        session.id = insert_session(conn, &session)?;

        ttlog_soft(
            conn,
            "add",
            &session.date_str(),
            &format!(
                "{} - {} ({} min)",
                session.start_str(),
                session.end_str(),
                session.duration
            ),
        );
        Ok(session)
    }

    /// Sessions in insertion order, filtered by a range expression
    /// (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `A:B`, `all`).
    pub fn list(conn: &Connection, range: Option<&str>) -> AppResult<Vec<Session>> {
        let bounds = match range {
            Some(r) => parse_range(r)?,
            None => None,
        };
        load_sessions(conn, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    #[test]
    fn manual_session_computes_duration() {
        let p = DbPool::in_memory().unwrap();
        let s = SessionLogic::add_manual(&p.conn, "2025-06-18", "09:00", "09:25").unwrap();
        assert_eq!(s.duration, 25);
        assert_eq!(s.source, SessionSource::Manual);

        let all = SessionLogic::list(&p.conn, None).unwrap();
        assert_eq!(all, vec![s]);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let p = DbPool::in_memory().unwrap();
        let err = SessionLogic::add_manual(&p.conn, "2025-06-18", "10:00", "09:00");
        assert!(matches!(err, Err(AppError::InvalidSession(_))));
        assert!(SessionLogic::add_manual(&p.conn, "18/06/2025", "09:00", "09:30").is_err());
        assert!(SessionLogic::add_manual(&p.conn, "2025-06-18", "9h", "09:30").is_err());
    }

    #[test]
    fn list_filters_by_range() {
        let p = DbPool::in_memory().unwrap();
        SessionLogic::add_manual(&p.conn, "2025-05-31", "09:00", "09:25").unwrap();
        SessionLogic::add_manual(&p.conn, "2025-06-01", "09:00", "09:25").unwrap();
        SessionLogic::add_manual(&p.conn, "2025-06-18", "09:00", "09:25").unwrap();

        assert_eq!(SessionLogic::list(&p.conn, Some("2025-06")).unwrap().len(), 2);
        assert_eq!(
            SessionLogic::list(&p.conn, Some("2025-05-31:2025-06-01"))
                .unwrap()
                .len(),
            2
        );
        assert_eq!(SessionLogic::list(&p.conn, Some("all")).unwrap().len(), 3);
    }
}
