use crate::models::session::Session;
use crate::utils::chart::render_daily_minutes;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Aggregated view of a set of sessions.
#[derive(Debug, Clone, Default)]
pub struct HistorySummary {
    pub total_sessions: usize,
    pub total_minutes: i64,
    pub per_day: BTreeMap<NaiveDate, i64>,
    /// Newest first.
    pub entries: Vec<Session>,
}

impl HistorySummary {
    pub fn from_sessions(sessions: &[Session]) -> Self {
        let mut per_day = BTreeMap::new();
        let mut total_minutes = 0;

        for s in sessions {
            *per_day.entry(s.date).or_insert(0) += s.duration;
            total_minutes += s.duration;
        }

        let mut entries = sessions.to_vec();
        entries.sort_by(|a, b| {
            (b.date, b.start_time, b.id).cmp(&(a.date, a.start_time, a.id))
        });

        Self {
            total_sessions: sessions.len(),
            total_minutes,
            per_day,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_sessions == 0
    }

    pub fn average_minutes(&self) -> i64 {
        if self.total_sessions == 0 {
            0
        } else {
            self.total_minutes / self.total_sessions as i64
        }
    }

    pub fn daily_points(&self) -> Vec<(NaiveDate, i64)> {
        self.per_day.iter().map(|(d, m)| (*d, *m)).collect()
    }

    /// Minutes per day as horizontal bars.
    pub fn chart(&self, width: usize) -> String {
        render_daily_minutes(&self.daily_points(), width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session_source::SessionSource;
    use chrono::NaiveTime;

    fn s(id: i64, date: &str, start: &str, minutes: i64) -> Session {
        let start = NaiveTime::parse_from_str(start, "%H:%M").unwrap();
        let mut s = Session::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start,
            start + chrono::Duration::minutes(minutes),
            minutes,
            SessionSource::Timer,
        );
        s.id = id;
        s
    }

    #[test]
    fn totals_and_per_day() {
        let sessions = vec![
            s(1, "2025-06-17", "09:00", 25),
            s(2, "2025-06-18", "09:00", 25),
            s(3, "2025-06-18", "10:00", 20),
        ];
        let h = HistorySummary::from_sessions(&sessions);

        assert_eq!(h.total_sessions, 3);
        assert_eq!(h.total_minutes, 70);
        assert_eq!(h.average_minutes(), 23);
        assert_eq!(
            h.daily_points(),
            vec![
                (NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(), 25),
                (NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(), 45),
            ]
        );

        let ids: Vec<_> = h.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn empty_history() {
        let h = HistorySummary::from_sessions(&[]);
        assert!(h.is_empty());
        assert_eq!(h.average_minutes(), 0);
        assert!(h.daily_points().is_empty());
    }
}
