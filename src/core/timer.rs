//! Pomodoro countdown and the loop that drives it.

use crate::core::goal::{GoalLogic, GoalTick};
use crate::db::log::ttlog_soft;
use crate::db::queries::insert_session;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::models::session_source::SessionSource;
use crate::utils::time::format_clock;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use rusqlite::Connection;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::time::Duration;

pub use crate::models::session_kind::SessionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running,
    Finished,
}

/// Countdown state for one interval.
#[derive(Debug, Clone)]
pub struct Countdown {
    kind: SessionKind,
    remaining_secs: u64,
    elapsed_secs: u64,
    running: bool,
    started_at: Option<NaiveDateTime>,
}

impl Countdown {
    pub fn new(kind: SessionKind, minutes: u32) -> Self {
        Self {
            kind,
            remaining_secs: u64::from(minutes) * 60,
            elapsed_secs: 0,
            running: false,
            started_at: None,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.started_at
    }

    /// Start the countdown. A second call while running changes nothing.
    pub fn start(&mut self, now: NaiveDateTime) {
        if self.running {
            return;
        }
        self.running = true;
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// One second of wall time.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            self.elapsed_secs += 1;
        }

        if self.remaining_secs == 0 {
            self.running = false;
            TickOutcome::Finished
        } else {
            TickOutcome::Running
        }
    }

    pub fn add_minute(&mut self) {
        self.remaining_secs += 60;
    }

    pub fn subtract_minute(&mut self) {
        self.remaining_secs = self.remaining_secs.saturating_sub(60);
    }

    /// `MM:SS`
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

/// After every `long_break_every`-th pomodoro comes a long break.
pub fn next_kind(completed_pomodoros: u32, long_break_every: u32) -> SessionKind {
    if long_break_every > 0 && completed_pomodoros > 0 && completed_pomodoros % long_break_every == 0
    {
        SessionKind::LongBreak
    } else {
        SessionKind::ShortBreak
    }
}

/// Keyboard commands fed to a running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    AddMinute,
    SubtractMinute,
    Stop,
}

impl TimerControl {
    /// `+` / `-` / `q`, one per input line.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "+" => Some(TimerControl::AddMinute),
            "-" => Some(TimerControl::SubtractMinute),
            "q" | "s" | "stop" => Some(TimerControl::Stop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Stopped,
}

pub struct TimerOptions {
    pub goal: Option<String>,
    pub save: bool,
    pub tick: Duration,
}

#[derive(Debug)]
pub struct TimerReport {
    pub outcome: RunOutcome,
    pub elapsed_secs: u64,
    pub saved: Option<Session>,
    pub goal_minutes: i64,
    pub goal_reached: bool,
}

/// Build the session row for a finished or stopped countdown.
/// Returns `None` for breaks and for runs shorter than a minute.
pub fn session_for(countdown: &Countdown) -> Option<Session> {
    if !countdown.kind().is_focus() {
        return None;
    }
    let start = countdown.started_at()?;
    let minutes = (countdown.elapsed_secs() / 60) as i64;
    if minutes < 1 {
        return None;
    }

    let end = start + ChronoDuration::seconds(countdown.elapsed_secs() as i64);
    Some(Session::new(
        start.date(),
        start.time(),
        end.time(),
        minutes,
        SessionSource::Timer,
    ))
}

pub struct TimerLogic;

impl TimerLogic {
    /// Drive `countdown` to completion.
    ///
    /// `sleep` is called once per tick, `interrupted` is polled before each
    /// tick (SIGINT), `controls` carries +1/-1 minute and stop requests.
    /// The linked goal gains one minute for every 60 elapsed seconds.
    pub fn run<S, F>(
        conn: &Connection,
        countdown: &mut Countdown,
        opts: &TimerOptions,
        interrupted: &AtomicBool,
        controls: Option<&Receiver<TimerControl>>,
        mut sleep: S,
        mut on_tick: F,
    ) -> AppResult<TimerReport>
    where
        S: FnMut(Duration),
        F: FnMut(&Countdown),
    {
        if let Some(title) = &opts.goal {
            GoalLogic::get(conn, title)?;
        }

        countdown.start(Local::now().naive_local());
        log::info!(
            "{} started ({} left)",
            countdown.kind().label(),
            countdown.display()
        );

        let mut goal_minutes = 0;
        let mut goal_reached = false;

        let outcome = loop {
            if interrupted.load(Ordering::SeqCst) {
                countdown.stop();
                break RunOutcome::Stopped;
            }

            if let Some(rx) = controls {
                let mut stop = false;
                while let Ok(ctrl) = rx.try_recv() {
                    match ctrl {
                        TimerControl::AddMinute => countdown.add_minute(),
                        TimerControl::SubtractMinute => countdown.subtract_minute(),
                        TimerControl::Stop => stop = true,
                    }
                }
                if stop {
                    countdown.stop();
                    break RunOutcome::Stopped;
                }
            }

            sleep(opts.tick);
            let before = countdown.elapsed_secs();
            let tick = countdown.tick();
            on_tick(countdown);

            let advanced = countdown.elapsed_secs() > before;
            if advanced
                && countdown.elapsed_secs() % 60 == 0
                && !goal_reached
                && let Some(title) = &opts.goal
            {
                match GoalLogic::tick(conn, title)? {
                    GoalTick::Ticked(_) => goal_minutes += 1,
                    GoalTick::Reached(_) => goal_reached = true,
                }
            }

            if tick == TickOutcome::Finished {
                break RunOutcome::Completed;
            }
        };

        log::info!(
            "{} {:?} after {}s",
            countdown.kind().label(),
            outcome,
            countdown.elapsed_secs()
        );

        let mut saved = None;
        if opts.save
            && let Some(mut session) = session_for(countdown)
        {
            session.id = insert_session(conn, &session)?;
            ttlog_soft(
                conn,
                "session",
                &session.date_str(),
                &format!(
                    "{} {} - {} ({} min, {:?})",
                    countdown.kind().label(),
                    session.start_str(),
                    session.end_str(),
                    session.duration,
                    outcome
                ),
            );
            saved = Some(session);
        }

        Ok(TimerReport {
            outcome,
            elapsed_secs: countdown.elapsed_secs(),
            saved,
            goal_minutes,
            goal_reached,
        })
    }
}
