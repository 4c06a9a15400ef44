use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

fn month_last_day(y: i32, m: u32) -> Option<u32> {
    let first_next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)?
    };
    Some(first_next.pred_opt()?.day())
}

/// Bounds of a single period token: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidRange(p.to_string());

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        7 => {
            let y: i32 = p[0..4].parse().map_err(|_| invalid())?;
            let m: u32 = p[5..7].parse().map_err(|_| invalid())?;
            let last = month_last_day(y, m).ok_or_else(invalid)?;
            let d1 = NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, m, last).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Parse a --period / --range value into inclusive date bounds.
///
/// Supported:
/// - `all` (no bounds)
/// - YYYY, YYYY-MM, YYYY-MM-DD
/// - any two of the above joined by `:` (same format on both sides)
pub fn parse_range(r: &str) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let r = r.trim();
    if r.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    if !r.is_ascii() {
        return Err(AppError::InvalidRange(r.to_string()));
    }

    if let Some((start, end)) = r.split_once(':') {
        let (start, end) = (start.trim(), end.trim());
        if start.len() != end.len() {
            return Err(AppError::InvalidRange(
                "start and end must have same format".into(),
            ));
        }
        let (d1, _) = period_bounds(start)?;
        let (_, d2) = period_bounds(end)?;
        if d2 < d1 {
            return Err(AppError::InvalidRange(format!("{r}: end before start")));
        }
        return Ok(Some((d1, d2)));
    }

    period_bounds(r).map(Some)
}

/// Human label of a period, used in list headers.
pub fn describe_range(r: Option<&str>) -> String {
    match r {
        None => "all time".to_string(),
        Some(p) if p.eq_ignore_ascii_case("all") => "all time".to_string(),
        Some(p) if p.len() == 7 && !p.contains(':') => match parse_date(&format!("{p}-01")) {
            Some(d) => d.format("%B %Y").to_string(),
            None => p.to_string(),
        },
        Some(p) if p.len() == 4 => format!("year {p}"),
        Some(p) => p.replace(':', " → "),
    }
}
