use crate::ui::messages::{success, warning};
use crate::utils::colors::legacy_rgba_to_hex;
use rusqlite::{Connection, OptionalExtension, Result, params};

const MIG_SESSION_SOURCE: &str = "20251019_0001_add_session_source";
const MIG_GOAL_COLORS: &str = "20251019_0002_goal_colors_to_hex";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM log
             WHERE operation = 'migration_applied' AND target = ?1
             LIMIT 1",
            [version],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

/// Create the `sessions` table with the modern schema (including `source`).
fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            date        TEXT,
            start_time  TEXT,
            end_time    TEXT,
            duration    INTEGER,
            source      TEXT NOT NULL DEFAULT 'timer'
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);
        "#,
    )?;
    Ok(())
}

fn create_goals_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS daily_goals (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            title      TEXT UNIQUE,
            time_done  INTEGER DEFAULT 0,
            time_goal  INTEGER,
            color      TEXT
        );
        "#,
    )?;
    Ok(())
}

/// Older databases carry a `sessions` table without the `source` column.
fn migrate_add_source_to_sessions(conn: &Connection) -> Result<()> {
    if migration_applied(conn, MIG_SESSION_SOURCE)? {
        return Ok(());
    }

    if !column_exists(conn, "sessions", "source")? {
        warning("Adding 'source' column to sessions table...");
        conn.execute(
            "ALTER TABLE sessions ADD COLUMN source TEXT NOT NULL DEFAULT 'timer'",
            [],
        )?;
        conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);")?;
        success(format!(
            "Migration applied: {} → added 'source' to sessions table",
            MIG_SESSION_SOURCE
        ));
    }

    mark_applied(conn, MIG_SESSION_SOURCE, "sessions.source present")
}

/// Goal colors were once stored as RGBA float lists (`[r, g, b, a]`).
fn migrate_goal_colors_to_hex(conn: &Connection) -> Result<()> {
    if migration_applied(conn, MIG_GOAL_COLORS)? {
        return Ok(());
    }

    let legacy: Vec<(i64, String)> = {
        let mut stmt = conn.prepare("SELECT id, color FROM daily_goals WHERE color LIKE '[%'")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<Result<_>>()?
    };

    for (id, raw) in &legacy {
        if let Some(hex) = legacy_rgba_to_hex(raw) {
            conn.execute(
                "UPDATE daily_goals SET color = ?1 WHERE id = ?2",
                params![hex, id],
            )?;
        }
    }

    if !legacy.is_empty() {
        success(format!(
            "Migration applied: {} → converted {} goal color(s)",
            MIG_GOAL_COLORS,
            legacy.len()
        ));
    }

    mark_applied(conn, MIG_GOAL_COLORS, "goal colors stored as #RRGGBB")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if table_exists(conn, "sessions")? {
        migrate_add_source_to_sessions(conn)?;
    } else {
        create_sessions_table(conn)?;
        mark_applied(conn, MIG_SESSION_SOURCE, "sessions created with source")?;
    }

    if table_exists(conn, "daily_goals")? {
        migrate_goal_colors_to_hex(conn)?;
    } else {
        create_goals_table(conn)?;
        mark_applied(conn, MIG_GOAL_COLORS, "daily_goals created")?;
    }

    Ok(())
}
