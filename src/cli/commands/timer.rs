use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::timer::{
    Countdown, RunOutcome, SessionKind, TimerControl, TimerLogic, TimerOptions, TimerReport,
    next_kind,
};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Forward `+`, `-` and `q` lines typed on an interactive terminal.
fn spawn_control_reader() -> Option<Receiver<TimerControl>> {
    if !io::stdin().is_terminal() {
        return None;
    }

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if let Some(ctrl) = TimerControl::parse(&line)
                && tx.send(ctrl).is_err()
            {
                break;
            }
        }
    });
    Some(rx)
}

fn print_tick(c: &Countdown) {
    print!("\r⏱  {:<12} {}  ", c.kind().label(), c.display());
    io::stdout().flush().ok();
}

fn report(kind: SessionKind, r: &TimerReport, goal: Option<&str>) {
    println!();
    match r.outcome {
        RunOutcome::Completed => success(format!("{} finished.", kind.label())),
        RunOutcome::Stopped => warning(format!(
            "{} stopped after {}s.",
            kind.label(),
            r.elapsed_secs
        )),
    }

    if let Some(s) = &r.saved {
        success(format!("Session saved: {}", s.history_line()));
    } else if kind.is_focus() {
        info("Session not saved.");
    }

    if let Some(title) = goal {
        if r.goal_reached {
            success(format!("Goal '{}' reached!", title));
        } else if r.goal_minutes > 0 {
            info(format!("Goal '{}': +{} min", title, r.goal_minutes));
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Timer {
        kind,
        minutes,
        goal,
        cycles,
        no_save,
        tick_ms,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        let interrupted = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&interrupted))?;

        let controls = spawn_control_reader();
        if controls.is_some() {
            info("Type + / - and Enter to add or remove a minute, q to stop. Ctrl+C stops too.");
        }

        // a break ignores --cycles
        let plan: Vec<SessionKind> = if kind.is_focus() {
            let n = (*cycles).max(1);
            let mut plan = Vec::new();
            for i in 1..=n {
                plan.push(SessionKind::Pomodoro);
                if i < n {
                    plan.push(next_kind(i, cfg.long_break_every));
                }
            }
            plan
        } else {
            vec![*kind]
        };

        for step in plan {
            let length = if step == *kind {
                minutes.unwrap_or_else(|| step.minutes(cfg))
            } else {
                step.minutes(cfg)
            };

            let opts = TimerOptions {
                goal: if step.is_focus() { goal.clone() } else { None },
                save: !*no_save,
                tick: Duration::from_millis(*tick_ms),
            };

            let mut countdown = Countdown::new(step, length);
            let result = TimerLogic::run(
                &pool.conn,
                &mut countdown,
                &opts,
                &interrupted,
                controls.as_ref(),
                thread::sleep,
                print_tick,
            )?;

            report(step, &result, opts.goal.as_deref());

            if result.outcome == RunOutcome::Stopped {
                break;
            }
        }
    }

    Ok(())
}
