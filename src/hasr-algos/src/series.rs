use chrono::NaiveDate;
use hasr_types::Session;

/// Time-ordered sessions of one athlete, the single source of truth for a run.
#[derive(Clone, Debug, Default)]
pub struct LoadSeries {
    sessions: Vec<Session>,
}

impl LoadSeries {
    pub fn new(mut sessions: Vec<Session>) -> Self {
        sessions.sort_by_key(|s| s.start);
        Self { sessions }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        let idx = self.sessions.partition_point(|s| s.date() < date);
        self.sessions.get(idx).is_some_and(|s| s.date() == date)
    }

    /// Sessions whose day lies in `first..=last`, oldest first.
    pub fn window(&self, first: NaiveDate, last: NaiveDate) -> &[Session] {
        let from = self.sessions.partition_point(|s| s.date() < first);
        let to = self.sessions.partition_point(|s| s.date() <= last);
        &self.sessions[from..to.max(from)]
    }

    /// Sessions on days strictly after `date`, or every session for `None`.
    pub fn sessions_after(&self, date: Option<NaiveDate>) -> &[Session] {
        match date {
            Some(date) => {
                let from = self.sessions.partition_point(|s| s.date() <= date);
                &self.sessions[from..]
            }
            None => &self.sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use hasr_types::Session;

    use super::LoadSeries;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn session(day: u32, hour: u32) -> Session {
        Session::new(at(day, hour), 1.0, 50.0, format!("day {day}"), "Running").unwrap()
    }

    fn series() -> LoadSeries {
        LoadSeries::new(vec![
            session(5, 18),
            session(1, 8),
            session(3, 7),
            session(5, 6),
            session(8, 9),
        ])
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn sorts_by_start() {
        let series = series();
        let starts: Vec<_> = series.sessions().iter().map(|s| s.start).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(series.sessions()[2].start, at(5, 6));
    }

    #[test]
    fn contains_only_session_days() {
        let series = series();
        assert!(series.contains_date(date(3)));
        assert!(series.contains_date(date(8)));
        assert!(!series.contains_date(date(4)));
        assert!(!series.contains_date(date(9)));
    }

    #[test]
    fn window_is_inclusive() {
        let series = series();
        assert_eq!(series.window(date(3), date(5)).len(), 3);
        assert_eq!(series.window(date(6), date(7)).len(), 0);
        assert_eq!(series.window(date(7), date(2)).len(), 0);
    }

    #[test]
    fn sessions_after_high_water_mark() {
        let series = series();
        assert_eq!(series.sessions_after(None).len(), 5);
        assert_eq!(series.sessions_after(Some(date(3))).len(), 3);
        assert!(series.sessions_after(Some(date(8))).is_empty());
    }
}
