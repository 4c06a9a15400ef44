use crate::db::pool::DbPool;
use crate::db::queries::{count_goals, count_sessions};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTS
    //
    let sessions = count_sessions(&pool.conn)?;
    let goals = count_goals(&pool.conn)?;
    let minutes: i64 = pool.conn.query_row(
        "SELECT COALESCE(SUM(duration), 0) FROM sessions",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Sessions:{} {}{}{}", CYAN, RESET, GREEN, sessions, RESET);
    println!("{}• Focus minutes:{} {}", CYAN, RESET, minutes);
    println!("{}• Daily goals:{} {}", CYAN, RESET, goals);

    //
    // 3) DATE RANGE
    //
    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM sessions", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM sessions", [], |row| row.get(0))
        .optional()?
        .flatten();

    let grey = || format!("{GREY}--{RESET}");
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", first_date.unwrap_or_else(grey));
    println!("    to:   {}", last_date.unwrap_or_else(grey));

    println!();
    Ok(())
}
