use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_goal, find_goal, insert_goal, load_goals, reset_goals, set_goal_done, update_goal,
};
use crate::errors::{AppError, AppResult};
use crate::models::goal::Goal;
use crate::utils::colors::is_valid_hex;
use rusqlite::Connection;
use std::cmp::Ordering;

/// Result of one minute of progress on a goal.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalTick {
    Ticked(Goal),
    /// Target already reached, nothing was recorded.
    Reached(Goal),
}

/// Fields that `goal edit` may change. `None` keeps the current value.
#[derive(Debug, Default)]
pub struct GoalEdit<'a> {
    pub new_title: Option<&'a str>,
    pub new_target: Option<i64>,
    pub new_color: Option<&'a str>,
}

pub struct GoalLogic;

fn check_color(color: &str) -> AppResult<()> {
    if is_valid_hex(color) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Invalid color '{}': expected #RRGGBB",
            color
        )))
    }
}

impl GoalLogic {
    pub fn add(conn: &Connection, title: &str, target: i64, color: &str) -> AppResult<Goal> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Goal title cannot be empty".into()));
        }
        check_color(color)?;

        if find_goal(conn, title)?.is_some() {
            return Err(AppError::GoalExists(title.to_string()));
        }

        let mut goal = Goal::new(title, target, color);
        goal.id = insert_goal(conn, &goal)?;

        ttlog_soft(
            conn,
            "goal_add",
            title,
            &format!("target {} min, color {}", goal.time_goal, goal.color),
        );
        Ok(goal)
    }

    /// All goals, most complete first.
    pub fn list(conn: &Connection) -> AppResult<Vec<Goal>> {
        let mut goals = load_goals(conn)?;
        goals.sort_by(|a, b| b.ratio().partial_cmp(&a.ratio()).unwrap_or(Ordering::Equal));
        Ok(goals)
    }

    pub fn get(conn: &Connection, title: &str) -> AppResult<Goal> {
        find_goal(conn, title.trim())?.ok_or_else(|| AppError::GoalNotFound(title.to_string()))
    }

    pub fn edit(pool: &mut DbPool, title: &str, changes: &GoalEdit) -> AppResult<Goal> {
        if let Some(color) = changes.new_color {
            check_color(color)?;
        }

        let updated = pool.with_conn(|conn| {
            let tx = conn.transaction()?;

            let mut goal = Self::get(&tx, title)?;
            let old_title = goal.title.clone();

            if let Some(new_title) = changes.new_title.map(str::trim)
                && !new_title.is_empty()
                && new_title != goal.title
            {
                if find_goal(&tx, new_title)?.is_some() {
                    return Err(AppError::GoalExists(new_title.to_string()));
                }
                goal.title = new_title.to_string();
            }

            if let Some(target) = changes.new_target {
                goal.time_goal = target.max(0);
            }
            if goal.time_goal > 0 && goal.time_done > goal.time_goal {
                goal.time_done = goal.time_goal;
            }

            if let Some(color) = changes.new_color {
                goal.color = color.to_string();
            }

            update_goal(&tx, &goal)?;
            ttlog_soft(
                &tx,
                "goal_edit",
                &old_title,
                &format!(
                    "title '{}', target {} min, done {} min",
                    goal.title, goal.time_goal, goal.time_done
                ),
            );
            tx.commit()?;
            Ok(goal)
        })?;

        Ok(updated)
    }

    pub fn delete(conn: &Connection, title: &str) -> AppResult<()> {
        let title = title.trim();
        if delete_goal(conn, title)? == 0 {
            return Err(AppError::GoalNotFound(title.to_string()));
        }
        ttlog_soft(conn, "goal_del", title, "goal deleted");
        Ok(())
    }

    /// One minute of work on `title`. Stops counting once the target is met.
    pub fn tick(conn: &Connection, title: &str) -> AppResult<GoalTick> {
        let mut goal = Self::get(conn, title)?;
        if goal.is_reached() {
            return Ok(GoalTick::Reached(goal));
        }

        goal.time_done += 1;
        set_goal_done(conn, goal.id, goal.time_done)?;
        Ok(GoalTick::Ticked(goal))
    }

    /// Record `minutes` of work at once. Returns the goal and the minutes
    /// actually counted.
    pub fn log_minutes(conn: &Connection, title: &str, minutes: u32) -> AppResult<(Goal, i64)> {
        let mut goal = Self::get(conn, title)?;
        let minutes = i64::from(minutes);

        let counted = if goal.time_goal > 0 {
            minutes.min((goal.time_goal - goal.time_done).max(0))
        } else {
            minutes
        };

        if counted > 0 {
            goal.time_done += counted;
            set_goal_done(conn, goal.id, goal.time_done)?;
        }

        ttlog_soft(
            conn,
            "goal_log",
            &goal.title,
            &format!("+{} min ({} / {})", counted, goal.time_done, goal.time_goal),
        );
        Ok((goal, counted))
    }

    /// Zero every goal's progress.
    pub fn reset_all(conn: &Connection) -> AppResult<usize> {
        let n = reset_goals(conn)?;
        ttlog_soft(conn, "goal_reset", "", &format!("{} goal(s) reset", n));
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> DbPool {
        DbPool::in_memory().unwrap()
    }

    #[test]
    fn add_rejects_empty_and_duplicate_titles() {
        let p = pool();
        assert!(matches!(
            GoalLogic::add(&p.conn, "   ", 30, "#77DD77"),
            Err(AppError::Validation(_))
        ));

        GoalLogic::add(&p.conn, "Algebra", 30, "#77DD77").unwrap();
        assert!(matches!(
            GoalLogic::add(&p.conn, "Algebra", 10, "#77DD77"),
            Err(AppError::GoalExists(_))
        ));
        assert!(GoalLogic::add(&p.conn, "Physics", 30, "green").is_err());
    }

    #[test]
    fn negative_target_clamps_to_zero() {
        let p = pool();
        let g = GoalLogic::add(&p.conn, "Reading", -5, "#77DD77").unwrap();
        assert_eq!(g.time_goal, 0);
    }

    #[test]
    fn tick_stops_at_target() {
        let p = pool();
        GoalLogic::add(&p.conn, "Chem", 2, "#77DD77").unwrap();

        assert!(matches!(GoalLogic::tick(&p.conn, "Chem").unwrap(), GoalTick::Ticked(_)));
        assert!(matches!(GoalLogic::tick(&p.conn, "Chem").unwrap(), GoalTick::Ticked(_)));
        match GoalLogic::tick(&p.conn, "Chem").unwrap() {
            GoalTick::Reached(g) => assert_eq!(g.time_done, 2),
            other => panic!("unexpected {:?}", other),
        }

        let (g, counted) = GoalLogic::log_minutes(&p.conn, "Chem", 10).unwrap();
        assert_eq!(counted, 0);
        assert_eq!(g.percent(), 100.0);
    }

    #[test]
    fn open_goal_keeps_counting() {
        let p = pool();
        GoalLogic::add(&p.conn, "Open", 0, "#77DD77").unwrap();
        let (g, counted) = GoalLogic::log_minutes(&p.conn, "Open", 3).unwrap();
        assert_eq!(counted, 3);
        assert_eq!(g.time_done, 3);
        assert_eq!(g.percent(), 0.0);
    }

    #[test]
    fn log_minutes_counts_up_to_target_in_one_write() {
        let p = pool();
        GoalLogic::add(&p.conn, "Physics", 45, "#77DD77").unwrap();
        GoalLogic::log_minutes(&p.conn, "Physics", 40).unwrap();

        let (g, counted) = GoalLogic::log_minutes(&p.conn, "Physics", 3000).unwrap();
        assert_eq!(counted, 5);
        assert_eq!(g.time_done, 45);
        assert_eq!(GoalLogic::get(&p.conn, "Physics").unwrap().time_done, 45);

        GoalLogic::add(&p.conn, "Free", 0, "#77DD77").unwrap();
        let (g, counted) = GoalLogic::log_minutes(&p.conn, "Free", u32::MAX).unwrap();
        assert_eq!(counted, i64::from(u32::MAX));
        assert_eq!(g.time_done, i64::from(u32::MAX));
    }

    #[test]
    fn edit_clamps_done_and_refuses_rename_onto_existing() {
        let mut p = pool();
        GoalLogic::add(&p.conn, "A", 60, "#77DD77").unwrap();
        GoalLogic::add(&p.conn, "B", 60, "#77DD77").unwrap();
        GoalLogic::log_minutes(&p.conn, "A", 40).unwrap();

        let g = GoalLogic::edit(
            &mut p,
            "A",
            &GoalEdit {
                new_target: Some(30),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(g.time_goal, 30);
        assert_eq!(g.time_done, 30);

        let err = GoalLogic::edit(
            &mut p,
            "A",
            &GoalEdit {
                new_title: Some("B"),
                ..Default::default()
            },
        );
        assert!(matches!(err, Err(AppError::GoalExists(_))));

        let g = GoalLogic::edit(
            &mut p,
            "A",
            &GoalEdit {
                new_title: Some("  "),
                new_target: Some(-1),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(g.title, "A");
        assert_eq!(g.time_goal, 0);
    }

    #[test]
    fn list_orders_by_completion_and_reset_zeroes() {
        let p = pool();
        GoalLogic::add(&p.conn, "low", 100, "#77DD77").unwrap();
        GoalLogic::add(&p.conn, "high", 10, "#77DD77").unwrap();
        GoalLogic::log_minutes(&p.conn, "low", 10).unwrap();
        GoalLogic::log_minutes(&p.conn, "high", 5).unwrap();

        let titles: Vec<_> = GoalLogic::list(&p.conn)
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["high", "low"]);

        assert_eq!(GoalLogic::reset_all(&p.conn).unwrap(), 2);
        assert!(GoalLogic::list(&p.conn).unwrap().iter().all(|g| g.time_done == 0));
    }

    #[test]
    fn delete_unknown_goal_fails() {
        let p = pool();
        assert!(matches!(
            GoalLogic::delete(&p.conn, "nope"),
            Err(AppError::GoalNotFound(_))
        ));
    }
}
