use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Record a focus session typed in by hand.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { date, start, end } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let session = SessionLogic::add_manual(&pool.conn, date, start, end)?;
        success(format!("Session added: {}", session.history_line()));
    }

    Ok(())
}
