use crate::errors::{AppError, AppResult};
use crate::models::goal::Goal;
use crate::models::session::Session;
use crate::models::session_source::SessionSource;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

// ---------------------------------------------------------------------------
// sessions
// ---------------------------------------------------------------------------

pub fn map_session_row(row: &Row) -> Result<Session> {
    let date_str: String = row.get("date")?;
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;
    let start_time = NaiveTime::parse_from_str(&start_str, "%H:%M")
        .map_err(|_| conversion_error(AppError::InvalidTime(start_str.clone())))?;
    let end_time = NaiveTime::parse_from_str(&end_str, "%H:%M")
        .map_err(|_| conversion_error(AppError::InvalidTime(end_str.clone())))?;

    let source_str: String = row.get("source")?;
    let source = SessionSource::from_db_str(&source_str).ok_or_else(|| {
        conversion_error(AppError::InvalidSession(format!(
            "unknown source: {}",
            source_str
        )))
    })?;

    Ok(Session {
        id: row.get("id")?,
        date,
        start_time,
        end_time,
        duration: row.get::<_, Option<i64>>("duration")?.unwrap_or(0),
        source,
    })
}

/// Insert a session and return its new row id.
pub fn insert_session(conn: &Connection, s: &Session) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sessions (date, start_time, end_time, duration, source)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            s.date_str(),
            s.start_str(),
            s.end_str(),
            s.duration,
            s.source.to_db_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Sessions in insertion order, optionally bounded by date (inclusive).
pub fn load_sessions(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<Session>> {
    let mut out = Vec::new();

    match bounds {
        Some((from, to)) => {
            let mut stmt = conn.prepare(
                "SELECT id, date, start_time, end_time, duration, source
                 FROM sessions
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(
                params![
                    from.format("%Y-%m-%d").to_string(),
                    to.format("%Y-%m-%d").to_string()
                ],
                map_session_row,
            )?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, date, start_time, end_time, duration, source
                 FROM sessions
                 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], map_session_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

pub fn count_sessions(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
}

// ---------------------------------------------------------------------------
// daily_goals
// ---------------------------------------------------------------------------

pub fn map_goal_row(row: &Row) -> Result<Goal> {
    Ok(Goal {
        id: row.get("id")?,
        title: row.get("title")?,
        time_done: row.get::<_, Option<i64>>("time_done")?.unwrap_or(0),
        time_goal: row.get::<_, Option<i64>>("time_goal")?.unwrap_or(0),
        color: row.get::<_, Option<String>>("color")?.unwrap_or_default(),
    })
}

pub fn load_goals(conn: &Connection) -> AppResult<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, time_done, time_goal, color FROM daily_goals ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], map_goal_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_goal(conn: &Connection, title: &str) -> AppResult<Option<Goal>> {
    let goal = conn
        .query_row(
            "SELECT id, title, time_done, time_goal, color FROM daily_goals WHERE title = ?1",
            [title],
            map_goal_row,
        )
        .optional()?;
    Ok(goal)
}

pub fn insert_goal(conn: &Connection, g: &Goal) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO daily_goals (title, time_done, time_goal, color)
         VALUES (?1, ?2, ?3, ?4)",
        params![g.title, g.time_done, g.time_goal, g.color],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full rewrite of a goal row identified by id (title may change).
pub fn update_goal(conn: &Connection, g: &Goal) -> AppResult<()> {
    conn.execute(
        "UPDATE daily_goals
         SET title = ?1, time_done = ?2, time_goal = ?3, color = ?4
         WHERE id = ?5",
        params![g.title, g.time_done, g.time_goal, g.color, g.id],
    )?;
    Ok(())
}

pub fn set_goal_done(conn: &Connection, id: i64, time_done: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE daily_goals SET time_done = ?1 WHERE id = ?2",
        params![time_done, id],
    )?;
    Ok(())
}

pub fn delete_goal(conn: &Connection, title: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM daily_goals WHERE title = ?1", [title])?)
}

pub fn reset_goals(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("UPDATE daily_goals SET time_done = 0", [])?)
}

pub fn count_goals(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM daily_goals", [], |row| row.get(0))
}
