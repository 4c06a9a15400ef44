//! Time utilities: parsing HH:MM and countdown formatting.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn require_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

/// Seconds → `MM:SS` (minutes may exceed two digits).
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(125 * 60 + 5), "125:05");
    }

    #[test]
    fn minutes_between_times() {
        let a = parse_time("09:00").unwrap();
        let b = parse_time("09:25").unwrap();
        assert_eq!(minutes_between(a, b), 25);
        assert!(require_time("9h").is_err());
    }
}
