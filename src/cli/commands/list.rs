use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::HistorySummary;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::goal::format_minutes;
use crate::ui::messages::{header, info};
use crate::utils::chart::DEFAULT_CHART_WIDTH;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::date::{describe_range, today};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, now, chart } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let today_str = today().format("%Y-%m-%d").to_string();
        let range = if *now {
            Some(today_str.as_str())
        } else {
            period.as_deref()
        };

        let sessions = SessionLogic::list(&pool.conn, range)?;
        let summary = HistorySummary::from_sessions(&sessions);

        header(format!("Sessions: {}", describe_range(range)));

        if summary.is_empty() {
            info("No sessions recorded.");
            return Ok(());
        }

        if *chart {
            print!("{}", summary.chart(DEFAULT_CHART_WIDTH));
            println!();
        }
        print_sessions(&summary);

        println!();
        println!(
            "{}Total:{} {} session(s), {} ({}avg {} min{})",
            CYAN,
            RESET,
            summary.total_sessions,
            format_minutes(summary.total_minutes),
            GREY,
            summary.average_minutes(),
            RESET
        );
    }

    Ok(())
}

fn print_sessions(summary: &HistorySummary) {
    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("Date", 10),
        Column::new("Start", 5),
        Column::new("End", 5),
        Column::new("Min", 5),
        Column::new("Source", 6),
    ]);

    for s in &summary.entries {
        table.add_row(vec![
            s.id.to_string(),
            s.date_str(),
            s.start_str(),
            s.end_str(),
            s.duration.to_string(),
            s.source.to_db_str().to_string(),
        ]);
    }

    print!("{}", table.render());
}
