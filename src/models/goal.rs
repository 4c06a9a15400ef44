use serde::Serialize;

/// A daily study goal: cumulative minutes against a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub time_done: i64, // minutes
    pub time_goal: i64, // minutes, 0 = no target
    pub color: String,  // #RRGGBB
}

impl Goal {
    pub fn new(title: &str, time_goal: i64, color: &str) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            time_done: 0,
            time_goal: time_goal.max(0),
            color: color.to_string(),
        }
    }

    /// Completion in percent, capped at 100. Zero when there is no target.
    pub fn percent(&self) -> f64 {
        if self.time_goal > 0 {
            (self.time_done as f64 / self.time_goal as f64 * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    /// Ratio used to order the goal list (most complete first).
    pub fn ratio(&self) -> f64 {
        if self.time_goal > 0 {
            self.time_done as f64 / self.time_goal as f64
        } else {
            0.0
        }
    }

    pub fn is_reached(&self) -> bool {
        self.time_goal > 0 && self.time_done >= self.time_goal
    }

    /// `1h 05m / 2h 00m`, or just the done part without a target.
    pub fn time_text(&self) -> String {
        if self.time_goal > 0 {
            format!(
                "{} / {}",
                format_minutes(self.time_done),
                format_minutes(self.time_goal)
            )
        } else {
            format_minutes(self.time_done)
        }
    }
}

/// `65` → `1h 05m`
pub fn format_minutes(minutes: i64) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    format!("{}h {:02}m", h, m)
}
