use chrono::NaiveDate;
use hasr_types::{BucketSummary, HasrRow, HasrScore, Session, SessionClassification, WindowSummary};

use crate::{
    ConfigError, HasrConfig, LoadSeries, StratumWeights, WeightProfile,
    helpers::numeric::round_float,
    window::{BaselineWindow, RecentWindow, WindowAggregator},
};

/// History-aware relative stratified load (HASR) of single anchor dates.
///
/// For an anchor date the baseline window is stratified into Easy, Hard and
/// Long sessions, the recent window is split with the same cut points, and
/// the composite of the per-stratum weighted means is compared:
///
/// `hasr = (we * recent_easy + wh * recent_hard + wl * recent_long)
///       / (we * base_easy + wh * base_hard + wl * base_long)`
///
/// Rows are independent of each other and only depend on the series.
#[derive(Clone, Debug)]
pub struct HasrCalculator {
    config: HasrConfig,
    baseline_profile: WeightProfile,
    recent_profile: WeightProfile,
}

impl HasrCalculator {
    pub fn new(config: HasrConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let baseline_profile =
            WeightProfile::exponential(config.baseline_window_days as usize, config.decay_lambda);
        let recent_profile =
            WeightProfile::exponential(config.recent_window_days as usize, config.decay_lambda);

        Ok(Self {
            config,
            baseline_profile,
            recent_profile,
        })
    }

    pub fn config(&self) -> &HasrConfig {
        &self.config
    }

    /// Row for `session`, anchored on its day.
    ///
    /// Without enough history the baseline, recent and HASR fields are NaN,
    /// the descriptive fields are still filled in.
    pub fn calculate(&self, series: &LoadSeries, session: &Session) -> HasrRow {
        let anchor = session.date();
        let aggregator = WindowAggregator::new(
            series,
            &self.config,
            &self.baseline_profile,
            &self.recent_profile,
        );

        let baseline = aggregator.baseline(anchor);
        let recent = baseline
            .as_ref()
            .and_then(|baseline| aggregator.recent(anchor, baseline));

        let baseline_summary = baseline
            .as_ref()
            .map(BaselineWindow::summary)
            .unwrap_or_else(WindowSummary::unavailable);
        let recent_summary = recent
            .as_ref()
            .map(RecentWindow::summary)
            .unwrap_or_else(WindowSummary::unavailable);

        let classification = match (&baseline, &recent) {
            (Some(baseline), Some(recent)) => classify_latest(baseline, recent),
            _ => None,
        };

        let weights = &self.config.stratum_weights;
        let baseline_composite = composite(weights, &baseline_summary);
        let recent_composite = composite(weights, &recent_summary);

        HasrRow {
            start: session.start,
            description: session.description.clone(),
            activity_type: session.activity_type.clone(),
            aggregate_variable: self.config.aggregate_variable.clone(),
            session: classification.map(|c| SessionClassification {
                stratum: c.stratum,
                baseline_rank: round_float(c.baseline_rank),
                class_rank: round_float(c.class_rank),
            }),
            score: HasrScore {
                ratio: round_float(recent_composite / baseline_composite),
                recent: round_float(recent_composite),
                baseline: round_float(baseline_composite),
            },
            recent: round_summary(recent_summary),
            baseline: round_summary(baseline_summary),
        }
    }

    /// Rows for every session on a day after `last_written`, oldest first.
    pub fn backfill(&self, series: &LoadSeries, last_written: Option<NaiveDate>) -> Vec<HasrRow> {
        series
            .sessions_after(last_written)
            .iter()
            .map(|session| self.calculate(series, session))
            .collect()
    }
}

/// Classify the latest session of the recent window against the baseline.
fn classify_latest(
    baseline: &BaselineWindow<'_>,
    recent: &RecentWindow<'_>,
) -> Option<SessionClassification> {
    let latest = recent.window.most_recent()?;
    let stratum = baseline.thresholds.classify(latest);

    Some(SessionClassification {
        stratum,
        baseline_rank: baseline.rank(latest.load),
        class_rank: baseline.class_rank(stratum, latest.load),
    })
}

fn composite(weights: &StratumWeights, summary: &WindowSummary) -> f64 {
    weights.easy * summary.easy.value
        + weights.hard * summary.hard.value
        + weights.long * summary.long.value
}

fn round_summary(summary: WindowSummary) -> WindowSummary {
    let round = |bucket: BucketSummary| BucketSummary {
        value: round_float(bucket.value),
        proportion: round_float(bucket.proportion),
    };

    WindowSummary {
        easy: round(summary.easy),
        hard: round(summary.hard),
        long: round(summary.long),
    }
}
