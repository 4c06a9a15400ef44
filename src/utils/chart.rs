//! Horizontal ASCII bar chart (minutes done per day).

use chrono::NaiveDate;

pub const DEFAULT_CHART_WIDTH: usize = 40;

/// One line per day: `2025-06-18 │████████████        50 min`.
/// Bars are scaled against the largest value.
pub fn render_daily_minutes(per_day: &[(NaiveDate, i64)], width: usize) -> String {
    let max = per_day.iter().map(|(_, m)| *m).max().unwrap_or(0);
    let mut out = String::new();

    for (date, minutes) in per_day {
        let len = if max > 0 {
            ((*minutes).max(0) as f64 / max as f64 * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{} │{}{} {:>4} min\n",
            date.format("%Y-%m-%d"),
            "█".repeat(len),
            " ".repeat(width.saturating_sub(len)),
            minutes
        ));
    }

    out
}
