use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::import::import_legacy_history;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        check,
        vacuum,
        info,
        import_history,
    } = cmd
    {
        // opening the pool runs any pending migration
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) IMPORT
        //
        if let Some(file) = import_history {
            let path = expand_tilde(file);
            println!("{}▶ Importing {}…{}", CYAN, path.display(), RESET);

            let report = pool.with_conn(|conn| import_legacy_history(conn, &path))?;

            println!(
                "{}✔ Imported {} session(s){}{}\n",
                GREEN,
                report.imported,
                RESET,
                if report.skipped > 0 {
                    format!(", {}{} skipped{}", YELLOW, report.skipped, RESET)
                } else {
                    String::new()
                }
            );
            ttlog_soft(
                &pool.conn,
                "import",
                &path.to_string_lossy(),
                &format!("{} imported, {} skipped", report.imported, report.skipped),
            );
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
