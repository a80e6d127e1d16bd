//! Baseline and recent windows of an anchor date.
//!
//! ```text
//!   |<------- baseline (90 d) ------->|<-- recent (21 d) -->|
//!   first                          last first           anchor
//! ```
//!
//! The baseline ends the day before the recent window starts. A window is only
//! available when its first day holds a session; the recent window also needs
//! the baseline, since it is stratified with the baseline thresholds.

use chrono::{NaiveDate, TimeDelta};
use hasr_types::{Session, Stratum, WindowSummary};

use crate::{
    HasrConfig, LoadSeries, WeightProfile,
    helpers::weighted::weighted_percentile_rank,
    stratifier::{Strata, Thresholds},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl WindowRange {
    pub fn baseline(anchor: NaiveDate, config: &HasrConfig) -> Self {
        let recent = i64::from(config.recent_window_days);
        let baseline = i64::from(config.baseline_window_days);
        Self {
            first: anchor - TimeDelta::days(recent + baseline - 1),
            last: anchor - TimeDelta::days(recent),
        }
    }

    pub fn recent(anchor: NaiveDate, config: &HasrConfig) -> Self {
        let recent = i64::from(config.recent_window_days);
        Self {
            first: anchor - TimeDelta::days(recent - 1),
            last: anchor,
        }
    }

    /// Offset of `date` from the last day of the window.
    pub fn days_back(&self, date: NaiveDate) -> Option<usize> {
        usize::try_from((self.last - date).num_days()).ok()
    }
}

/// Sessions of a window with their decay weights.
///
/// Weights are addressed by the day offset from the end of the window, so
/// rest days leave their weight unused instead of shifting older sessions.
#[derive(Clone, Debug)]
pub struct WeightedWindow<'a> {
    range: WindowRange,
    sessions: &'a [Session],
    weights: Vec<f64>,
}

impl<'a> WeightedWindow<'a> {
    /// `None` when the first day of the range has no session.
    pub fn collect(
        series: &'a LoadSeries,
        range: WindowRange,
        profile: &WeightProfile,
    ) -> Option<Self> {
        if !series.contains_date(range.first) {
            return None;
        }

        let sessions = series.window(range.first, range.last);
        let weights = sessions
            .iter()
            .map(|s| {
                range
                    .days_back(s.date())
                    .and_then(|offset| profile.weight(offset))
                    .unwrap_or_default()
            })
            .collect();

        Some(Self {
            range,
            sessions,
            weights,
        })
    }

    pub fn range(&self) -> WindowRange {
        self.range
    }

    pub fn sessions(&self) -> &'a [Session] {
        self.sessions
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Session, f64)> + '_ {
        self.sessions.iter().zip(self.weights.iter().copied())
    }

    pub fn loads(&self) -> Vec<f64> {
        self.sessions.iter().map(|s| s.load).collect()
    }

    pub fn loads_per_minute(&self) -> Vec<f64> {
        self.sessions.iter().map(Session::load_per_minute).collect()
    }

    /// Latest session of the window.
    pub fn most_recent(&self) -> Option<&'a Session> {
        self.sessions.last()
    }
}

#[derive(Clone, Debug)]
pub struct BaselineWindow<'a> {
    pub window: WeightedWindow<'a>,
    pub thresholds: Thresholds,
    pub strata: Strata,
}

impl BaselineWindow<'_> {
    /// Weighted percentile rank of `load` within the whole baseline.
    pub fn rank(&self, load: f64) -> f64 {
        weighted_percentile_rank(load, &self.window.loads(), self.window.weights())
    }

    /// Weighted percentile rank of `load` within one baseline stratum.
    pub fn class_rank(&self, stratum: Stratum, load: f64) -> f64 {
        let bucket = self.strata.bucket(stratum);
        weighted_percentile_rank(load, &bucket.loads, &bucket.weights)
    }

    pub fn summary(&self) -> WindowSummary {
        self.strata.summary()
    }
}

#[derive(Clone, Debug)]
pub struct RecentWindow<'a> {
    pub window: WeightedWindow<'a>,
    pub strata: Strata,
}

impl RecentWindow<'_> {
    pub fn summary(&self) -> WindowSummary {
        self.strata.summary()
    }
}

/// Builds the windows of an anchor date: baseline first, then recent with the
/// baseline's thresholds.
pub struct WindowAggregator<'a> {
    series: &'a LoadSeries,
    config: &'a HasrConfig,
    baseline_profile: &'a WeightProfile,
    recent_profile: &'a WeightProfile,
}

impl<'a> WindowAggregator<'a> {
    pub fn new(
        series: &'a LoadSeries,
        config: &'a HasrConfig,
        baseline_profile: &'a WeightProfile,
        recent_profile: &'a WeightProfile,
    ) -> Self {
        Self {
            series,
            config,
            baseline_profile,
            recent_profile,
        }
    }

    pub fn baseline(&self, anchor: NaiveDate) -> Option<BaselineWindow<'a>> {
        let range = WindowRange::baseline(anchor, self.config);
        let window = WeightedWindow::collect(self.series, range, self.baseline_profile)?;
        let thresholds = Thresholds::from_baseline(
            &window,
            self.config.quantile_hard,
            self.config.quantile_long,
        );
        let strata = Strata::split(&window, &thresholds);

        Some(BaselineWindow {
            window,
            thresholds,
            strata,
        })
    }

    pub fn recent(
        &self,
        anchor: NaiveDate,
        baseline: &BaselineWindow<'_>,
    ) -> Option<RecentWindow<'a>> {
        let range = WindowRange::recent(anchor, self.config);
        let window = WeightedWindow::collect(self.series, range, self.recent_profile)?;
        let strata = Strata::split(&window, &baseline.thresholds);

        Some(RecentWindow { window, strata })
    }
}
