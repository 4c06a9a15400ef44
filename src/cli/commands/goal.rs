use crate::cli::parser::{Commands, GoalCommands};
use crate::config::Config;
use crate::core::goal::{GoalEdit, GoalLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::goal::Goal;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{RESET, color_for_percent, paint_hex};
use crate::utils::formatting::{pad_right, truncate};
use crate::utils::progress_bar;

const TITLE_WIDTH: usize = 24;
const BAR_WIDTH: usize = 20;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Goal { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        GoalCommands::Add {
            title,
            target,
            color,
        } => {
            let color = color.as_deref().unwrap_or(cfg.default_goal_color.as_str());
            let goal = GoalLogic::add(&pool.conn, title, *target, color)?;
            success(format!("Goal added: {} ({})", goal.title, goal.time_text()));
        }

        GoalCommands::List => {
            let goals = GoalLogic::list(&pool.conn)?;
            header("Daily goals");
            if goals.is_empty() {
                info("No goals yet. Add one with `rpomo goal add <title> --target <min>`.");
            }
            for g in &goals {
                println!("{}", goal_line(g));
            }
        }

        GoalCommands::Edit {
            title,
            new_title,
            target,
            color,
        } => {
            let changes = GoalEdit {
                new_title: new_title.as_deref(),
                new_target: *target,
                new_color: color.as_deref(),
            };
            let goal = GoalLogic::edit(&mut pool, title, &changes)?;
            success(format!("Goal updated: {} ({})", goal.title, goal.time_text()));
        }

        GoalCommands::Del { title } => {
            GoalLogic::delete(&pool.conn, title)?;
            success(format!("Goal deleted: {}", title.trim()));
        }

        GoalCommands::Log { title, minutes } => {
            let (goal, counted) = GoalLogic::log_minutes(&pool.conn, title, *minutes)?;
            if counted < i64::from(*minutes) {
                warning(format!(
                    "Target reached: only {} of {} minute(s) counted.",
                    counted, minutes
                ));
            }
            println!("{}", goal_line(&goal));
        }

        GoalCommands::Reset => {
            let n = GoalLogic::reset_all(&pool.conn)?;
            success(format!("{} goal(s) reset for a new day.", n));
        }
    }

    Ok(())
}

/// `Algebra                  [██████░░░░]  60%  0h 36m / 1h 00m`
fn goal_line(g: &Goal) -> String {
    let title = pad_right(&truncate(&g.title, TITLE_WIDTH), TITLE_WIDTH);
    let percent = g.percent();
    format!(
        "{} {} {}{:>3.0}%{}  {}",
        paint_hex(&g.color, &title),
        progress_bar(percent, BAR_WIDTH),
        color_for_percent(percent),
        percent,
        RESET,
        g.time_text()
    )
}
