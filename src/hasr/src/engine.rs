use std::fmt;

use anyhow::Context;
use chrono::NaiveDate;
use hasr_algos::{ConfigError, HasrCalculator, HasrConfig, LoadSeries};
use hasr_types::{HasrRow, Session};
use indicatif::{ProgressBar, ProgressStyle};

/// Where the sessions of a run come from.
#[allow(async_fn_in_trait)]
pub trait SessionSource {
    async fn fetch_sessions(&self) -> anyhow::Result<Vec<Session>>;
}

/// Append-only destination of computed rows.
#[allow(async_fn_in_trait)]
pub trait RowSink {
    /// Day of the last written row, `None` when nothing was written yet.
    async fn last_written_date(&self) -> anyhow::Result<Option<NaiveDate>>;
    /// Stores every row or, on error, none of them.
    async fn append_rows(&self, rows: Vec<HasrRow>) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub sessions_read: usize,
    pub rows_written: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl fmt::Display for BackfillReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Backfill complete:")?;
        writeln!(f, "  sessions read: {}", self.sessions_read)?;
        write!(f, "  rows written:  {}", self.rows_written)?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            write!(f, " ({first} to {last})")?;
        }
        Ok(())
    }
}

fn bar_style() -> anyhow::Result<ProgressStyle> {
    let style = ProgressStyle::with_template(
        "{prefix:>12} [{wide_bar:.cyan/dim}] {pos}/{len} ({elapsed}, {eta} remaining)",
    )?
    .progress_chars("=>-");

    Ok(style)
}

/// Brings a row sink up to date with a session source.
///
/// Every run reads the full source, continues after the sink's last written
/// day and hands the missing rows to the sink in a single append. A failed
/// run leaves the sink as it was, so rerunning after an error is safe.
pub struct HasrEngine<S, K> {
    source: S,
    sink: K,
    calculator: HasrCalculator,
}

impl<S, K> HasrEngine<S, K>
where
    S: SessionSource,
    K: RowSink,
{
    pub fn new(source: S, sink: K, config: HasrConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            source,
            sink,
            calculator: HasrCalculator::new(config)?,
        })
    }

    pub async fn run(&self) -> anyhow::Result<BackfillReport> {
        let sessions = self
            .source
            .fetch_sessions()
            .await
            .context("Failed to read sessions")?;
        let series = LoadSeries::new(sessions);

        let last_written = self
            .sink
            .last_written_date()
            .await
            .context("Failed to read last written date")?;
        match last_written {
            Some(date) => info!("Last written date: {date}"),
            None => info!("No rows written yet, starting from the first session"),
        }

        let pending = series.sessions_after(last_written);
        let rows = self.calculate(&series, pending)?;

        let report = BackfillReport {
            sessions_read: series.len(),
            rows_written: rows.len(),
            first_date: rows.first().map(|row| row.start.date()),
            last_date: rows.last().map(|row| row.start.date()),
        };

        if !rows.is_empty() {
            self.sink
                .append_rows(rows)
                .await
                .context("Failed to append rows")?;
        }

        Ok(report)
    }

    fn calculate(&self, series: &LoadSeries, pending: &[Session]) -> anyhow::Result<Vec<HasrRow>> {
        let pb = ProgressBar::new(pending.len() as u64);
        pb.set_style(bar_style()?);
        pb.set_prefix("HASR");

        let mut rows = Vec::with_capacity(pending.len());
        for session in pending {
            let row = self.calculator.calculate(series, session);
            log_row(&row);
            rows.push(row);
            pb.inc(1);
        }
        pb.finish_and_clear();

        Ok(rows)
    }
}

fn log_row(row: &HasrRow) {
    let date = row.start.date();
    match row.session {
        Some(session) => info!(
            "{date}: HASR {:.2} ({} session, baseline rank {:.2})",
            row.score.ratio, session.stratum, session.baseline_rank
        ),
        None => info!("{date}: not enough history"),
    }

    let recent = row.recent.within_ratios();
    let baseline = row.baseline.within_ratios();
    let [b1, b2, b3] = row.recent_vs_baseline();
    debug!(
        "{date}: recent hard/easy {:.2}, long/hard {:.2}, long/easy {:.2}",
        recent.hard_easy, recent.long_hard, recent.long_easy
    );
    debug!(
        "{date}: baseline hard/easy {:.2}, long/hard {:.2}, long/easy {:.2}",
        baseline.hard_easy, baseline.long_hard, baseline.long_easy
    );
    debug!("{date}: recent vs baseline B1 {b1:.2}, B2 {b2:.2}, B3 {b3:.2}");
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use chrono::{NaiveDate, TimeDelta};
    use hasr_types::Stratum;

    use super::*;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap() + TimeDelta::days(n - 1)
    }

    fn session(n: i64) -> Session {
        Session::new(
            day(n).and_hms_opt(7, 0, 0).unwrap(),
            1.0,
            80.0 + (n % 5) as f64 * 10.0,
            format!("Session {n}"),
            "Running",
        )
        .unwrap()
    }

    struct MemorySource(Mutex<Vec<Session>>);

    impl MemorySource {
        fn days(days: std::ops::RangeInclusive<i64>) -> Self {
            Self(Mutex::new(days.map(session).collect()))
        }

        fn push(&self, session: Session) {
            self.0.lock().unwrap().push(session);
        }
    }

    impl SessionSource for MemorySource {
        async fn fetch_sessions(&self) -> anyhow::Result<Vec<Session>> {
            Ok(self.0.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        rows: Mutex<Vec<HasrRow>>,
        appends: Mutex<usize>,
        fail_append: bool,
    }

    impl MemorySink {
        fn rows(&self) -> Vec<HasrRow> {
            self.rows.lock().unwrap().clone()
        }
    }

    impl RowSink for MemorySink {
        async fn last_written_date(&self) -> anyhow::Result<Option<NaiveDate>> {
            Ok(self.rows.lock().unwrap().last().map(|row| row.start.date()))
        }

        async fn append_rows(&self, rows: Vec<HasrRow>) -> anyhow::Result<()> {
            if self.fail_append {
                return Err(anyhow!("sink is read-only"));
            }
            *self.appends.lock().unwrap() += 1;
            self.rows.lock().unwrap().extend(rows);
            Ok(())
        }
    }

    struct BrokenSource;

    impl SessionSource for BrokenSource {
        async fn fetch_sessions(&self) -> anyhow::Result<Vec<Session>> {
            Err(anyhow!("connection lost"))
        }
    }

    #[tokio::test]
    async fn empty_sink_gets_every_session() {
        let engine = HasrEngine::new(
            MemorySource::days(1..=120),
            MemorySink::default(),
            HasrConfig::default(),
        )
        .unwrap();

        let report = engine.run().await.unwrap();
        assert_eq!(report.sessions_read, 120);
        assert_eq!(report.rows_written, 120);
        assert_eq!(report.first_date, Some(day(1)));
        assert_eq!(report.last_date, Some(day(120)));

        let rows = engine.sink.rows();
        assert!(rows.windows(2).all(|w| w[0].start < w[1].start));

        // Anchors before day 111 lack a complete baseline.
        let (undefined, defined) = rows.split_at(110);
        assert!(undefined.iter().all(|row| row.score.ratio.is_nan()));
        assert!(defined.iter().all(|row| row.score.ratio.is_finite()));
        assert!(defined.iter().all(|row| row.session.is_some()));
    }

    #[tokio::test]
    async fn rerun_only_appends_new_days() {
        let engine = HasrEngine::new(
            MemorySource::days(1..=115),
            MemorySink::default(),
            HasrConfig::default(),
        )
        .unwrap();

        engine.run().await.unwrap();
        let before = engine.sink.rows();

        let report = engine.run().await.unwrap();
        assert_eq!(report.rows_written, 0);
        assert_eq!(report.first_date, None);
        assert_eq!(*engine.sink.appends.lock().unwrap(), 1);
        assert_eq!(engine.sink.rows().len(), before.len());

        engine.source.push(session(116));
        engine.source.push(session(117));
        let report = engine.run().await.unwrap();
        assert_eq!(report.rows_written, 2);
        assert_eq!(report.first_date, Some(day(116)));

        let rows = engine.sink.rows();
        assert_eq!(rows.len(), 117);
        // Earlier rows are never rewritten.
        let starts = |rows: &[HasrRow]| rows.iter().map(|row| row.start).collect::<Vec<_>>();
        assert_eq!(starts(&rows[..115]), starts(&before));
        assert_eq!(&rows[110..115], &before[110..]);
    }

    #[tokio::test]
    async fn same_day_sessions_get_a_row_each() {
        let source = MemorySource::days(1..=115);
        let evening = Session::new(
            day(115).and_hms_opt(18, 0, 0).unwrap(),
            1.0,
            300.0,
            "Evening intervals",
            "Running",
        )
        .unwrap();
        source.push(evening.clone());
        let engine = HasrEngine::new(source, MemorySink::default(), HasrConfig::default()).unwrap();

        let report = engine.run().await.unwrap();
        assert_eq!(report.rows_written, 116);

        let rows = engine.sink.rows();
        let (morning_row, evening_row) = (&rows[114], &rows[115]);
        assert_eq!(morning_row.start, session(115).start);
        assert_eq!(evening_row.start, evening.start);

        // The evening session is the latest of the day, both rows classify it.
        let classified = evening_row.session.unwrap();
        assert_eq!(classified.stratum, Stratum::Hard);
        assert_eq!(morning_row.session, evening_row.session);
        assert_eq!(morning_row.score, evening_row.score);

        let report = engine.run().await.unwrap();
        assert_eq!(report.rows_written, 0);
        assert_eq!(*engine.sink.appends.lock().unwrap(), 1);
        assert_eq!(engine.sink.rows().len(), 116);
    }

    #[tokio::test]
    async fn source_failure_appends_nothing() {
        let engine =
            HasrEngine::new(BrokenSource, MemorySink::default(), HasrConfig::default()).unwrap();

        let err = engine.run().await.unwrap_err();
        assert!(format!("{err:#}").contains("connection lost"));
        assert!(engine.sink.rows().is_empty());
        assert_eq!(*engine.sink.appends.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn sink_failure_is_reported() {
        let sink = MemorySink {
            fail_append: true,
            ..Default::default()
        };
        let engine =
            HasrEngine::new(MemorySource::days(1..=5), sink, HasrConfig::default()).unwrap();

        assert!(engine.run().await.is_err());
        assert!(engine.sink.rows().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = HasrConfig {
            recent_window_days: 0,
            ..Default::default()
        };
        assert!(HasrEngine::new(BrokenSource, MemorySink::default(), config).is_err());
    }

    #[test]
    fn report_lists_date_range() {
        let report = BackfillReport {
            sessions_read: 10,
            rows_written: 2,
            first_date: Some(day(9)),
            last_date: Some(day(10)),
        };
        let text = report.to_string();
        assert!(text.contains("sessions read: 10"));
        assert!(text.contains("(2024-11-09 to 2024-11-10)"));
    }
}
