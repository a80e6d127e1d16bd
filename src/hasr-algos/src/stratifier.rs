use hasr_types::{BucketSummary, Session, Stratum, WindowSummary};

use crate::{
    helpers::weighted::{weighted_mean, weighted_quantile},
    window::WeightedWindow,
};

/// Cut points derived from a baseline window.
///
/// `long` is NaN when every baseline session is Hard; no session is Long then.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    /// Weighted load-per-minute quantile.
    pub hard: f64,
    /// Weighted duration quantile of the non-Hard sessions.
    pub long: f64,
}

impl Thresholds {
    pub fn from_baseline(
        baseline: &WeightedWindow<'_>,
        quantile_hard: f64,
        quantile_long: f64,
    ) -> Self {
        let hard = weighted_quantile(
            &baseline.loads_per_minute(),
            baseline.weights(),
            quantile_hard,
        );

        let (durations, weights): (Vec<f64>, Vec<f64>) = baseline
            .iter()
            .filter(|(session, _)| !is_hard(session, hard))
            .map(|(session, weight)| (session.duration_hours, weight))
            .unzip();
        let long = weighted_quantile(&durations, &weights, quantile_long);

        Self { hard, long }
    }

    pub fn classify(&self, session: &Session) -> Stratum {
        if is_hard(session, self.hard) {
            Stratum::Hard
        } else if session.duration_hours > self.long {
            Stratum::Long
        } else {
            Stratum::Easy
        }
    }
}

fn is_hard(session: &Session, threshold: f64) -> bool {
    session.load_per_minute() > threshold
}

/// Loads and weights of the sessions in one stratum.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bucket {
    pub loads: Vec<f64>,
    pub weights: Vec<f64>,
}

impl Bucket {
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Weighted mean load, 0 for an empty bucket.
    pub fn mean(&self) -> f64 {
        weighted_mean(&self.loads, &self.weights)
    }
}

/// A window partitioned into Easy, Hard and Long sessions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Strata {
    pub easy: Bucket,
    pub hard: Bucket,
    pub long: Bucket,
}

impl Strata {
    pub fn split(window: &WeightedWindow<'_>, thresholds: &Thresholds) -> Self {
        let mut strata = Strata::default();
        for (session, weight) in window.iter() {
            let bucket = strata.bucket_mut(thresholds.classify(session));
            bucket.loads.push(session.load);
            bucket.weights.push(weight);
        }
        strata
    }

    pub fn bucket(&self, stratum: Stratum) -> &Bucket {
        match stratum {
            Stratum::Easy => &self.easy,
            Stratum::Hard => &self.hard,
            Stratum::Long => &self.long,
        }
    }

    fn bucket_mut(&mut self, stratum: Stratum) -> &mut Bucket {
        match stratum {
            Stratum::Easy => &mut self.easy,
            Stratum::Hard => &mut self.hard,
            Stratum::Long => &mut self.long,
        }
    }

    pub fn total(&self) -> usize {
        self.easy.len() + self.hard.len() + self.long.len()
    }

    /// Share of sessions (by count, not weight) in `stratum`, in percent.
    pub fn proportion(&self, stratum: Stratum) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.bucket(stratum).len() as f64 / total as f64 * 100.0
        }
    }

    pub fn summary(&self) -> WindowSummary {
        let summarize = |stratum| BucketSummary {
            value: self.bucket(stratum).mean(),
            proportion: self.proportion(stratum),
        };

        WindowSummary {
            easy: summarize(Stratum::Easy),
            hard: summarize(Stratum::Hard),
            long: summarize(Stratum::Long),
        }
    }
}
