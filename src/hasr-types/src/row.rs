//! Output record of the HASR computation and its persisted column layout.
//!
//! Undefined values (insufficient history) are carried as `NaN`, IEEE
//! infinities from zero baselines are kept as-is.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Stratum;

/// Weighted mean and population share (in percent) of one stratum.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    pub value: f64,
    pub proportion: f64,
}

impl BucketSummary {
    pub const UNAVAILABLE: BucketSummary = BucketSummary {
        value: f64::NAN,
        proportion: f64::NAN,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub easy: BucketSummary,
    pub hard: BucketSummary,
    pub long: BucketSummary,
}

/// Ratios between the strata of a single window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WithinRatios {
    pub hard_easy: f64,
    pub long_hard: f64,
    pub long_easy: f64,
}

impl WindowSummary {
    pub fn unavailable() -> Self {
        Self {
            easy: BucketSummary::UNAVAILABLE,
            hard: BucketSummary::UNAVAILABLE,
            long: BucketSummary::UNAVAILABLE,
        }
    }

    pub fn bucket(&self, stratum: Stratum) -> BucketSummary {
        match stratum {
            Stratum::Easy => self.easy,
            Stratum::Hard => self.hard,
            Stratum::Long => self.long,
        }
    }

    pub fn within_ratios(&self) -> WithinRatios {
        WithinRatios {
            hard_easy: self.hard.value / self.easy.value,
            long_hard: self.long.value / self.hard.value,
            long_easy: self.long.value / self.easy.value,
        }
    }
}

/// Where the session defining a row falls within the baseline distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionClassification {
    pub stratum: Stratum,
    /// Weighted percentile rank within the whole baseline window.
    pub baseline_rank: f64,
    /// Weighted percentile rank within the baseline sessions of `stratum`.
    pub class_rank: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HasrScore {
    pub ratio: f64,
    pub recent: f64,
    pub baseline: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HasrRow {
    pub start: NaiveDateTime,
    pub description: String,
    pub activity_type: String,
    pub aggregate_variable: String,
    pub session: Option<SessionClassification>,
    pub score: HasrScore,
    pub recent: WindowSummary,
    pub baseline: WindowSummary,
}

impl HasrRow {
    /// Recent over baseline weighted mean, per stratum in bucket order.
    pub fn recent_vs_baseline(&self) -> [f64; 3] {
        Stratum::ALL.map(|s| self.recent.bucket(s).value / self.baseline.bucket(s).value)
    }

    pub fn weekday(&self) -> String {
        self.start.format("%A").to_string()
    }

    /// Cells in the order of [`column_names`]. Undefined values are empty.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.start.year().to_string(),
            self.start.month().to_string(),
            self.start.day().to_string(),
            self.weekday(),
            self.description.clone(),
            self.activity_type.clone(),
            self.start.format("%H:%M").to_string(),
            self.aggregate_variable.clone(),
        ];

        match self.session {
            Some(session) => cells.extend([
                format_value(session.baseline_rank),
                session.stratum.to_string(),
                format_value(session.class_rank),
            ]),
            None => cells.extend([String::new(), String::new(), String::new()]),
        }

        cells.extend([
            format_value(self.score.ratio),
            format_value(self.score.recent),
            format_value(self.score.baseline),
        ]);

        for stratum in Stratum::ALL {
            let recent = self.recent.bucket(stratum);
            let baseline = self.baseline.bucket(stratum);
            cells.extend([
                format_value(recent.value),
                format_value(baseline.value),
                format_value(recent.proportion),
                format_value(baseline.proportion),
            ]);
        }

        cells
    }
}

/// Header of the persisted HASR table. The order is a compatibility contract.
pub fn column_names(abbreviation: &str) -> Vec<String> {
    let mut columns: Vec<String> = [
        "Year",
        "Month",
        "Day",
        "Weekday",
        "Description",
        "Activity type",
        "Start time",
        "Aggregate variable",
        "Session Baseline Rank",
        "Session Baseline Class",
        "Session Baseline Class Rank",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    columns.push(format!("HASR-{abbreviation}"));
    columns.push(format!("HASR-{abbreviation} Recent"));
    columns.push(format!("HASR-{abbreviation} Baseline"));

    for stratum in Stratum::ALL {
        let bucket = stratum.bucket_label();
        columns.push(format!("Recent {bucket}"));
        columns.push(format!("Baseline {bucket}"));
        columns.push(format!("Recent {bucket} prop. [%]"));
        columns.push(format!("Baseline {bucket} prop. [%]"));
    }

    columns
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn summary(easy: f64, hard: f64, long: f64) -> WindowSummary {
        WindowSummary {
            easy: BucketSummary {
                value: easy,
                proportion: 50.0,
            },
            hard: BucketSummary {
                value: hard,
                proportion: 25.0,
            },
            long: BucketSummary {
                value: long,
                proportion: 25.0,
            },
        }
    }

    fn row() -> HasrRow {
        HasrRow {
            start: NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(18, 5, 0)
                .unwrap(),
            description: "Tempo run".to_string(),
            activity_type: "Running".to_string(),
            aggregate_variable: "Training load".to_string(),
            session: Some(SessionClassification {
                stratum: Stratum::Hard,
                baseline_rank: 0.91,
                class_rank: 0.4,
            }),
            score: HasrScore {
                ratio: 1.12,
                recent: 112.0,
                baseline: 100.0,
            },
            recent: summary(60.0, 150.0, 0.0),
            baseline: summary(50.0, 120.0, 0.0),
        }
    }

    #[test]
    fn header_and_cells_line_up() {
        let columns = column_names("TL");
        let cells = row().cells();
        assert_eq!(columns.len(), 26);
        assert_eq!(cells.len(), columns.len());

        let cell = |name: &str| {
            let idx = columns.iter().position(|c| c == name).unwrap();
            cells[idx].clone()
        };
        assert_eq!(cell("Weekday"), "Monday");
        assert_eq!(cell("Start time"), "18:05");
        assert_eq!(cell("Session Baseline Class"), "Hard");
        assert_eq!(cell("HASR-TL"), "1.12");
        assert_eq!(cell("Recent B2"), "150");
        assert_eq!(cell("Baseline B1 prop. [%]"), "50");
    }

    #[test]
    fn undefined_values_are_empty_cells() {
        let mut row = row();
        row.session = None;
        row.score.ratio = f64::NAN;
        row.baseline = WindowSummary::unavailable();

        let columns = column_names("TL");
        let cells = row.cells();
        let idx = |name: &str| columns.iter().position(|c| c == name).unwrap();

        assert_eq!(cells[idx("Session Baseline Rank")], "");
        assert_eq!(cells[idx("Session Baseline Class")], "");
        assert_eq!(cells[idx("HASR-TL")], "");
        assert_eq!(cells[idx("Baseline B3")], "");
        assert_eq!(cells[idx("Year")], "2025");
    }

    #[test]
    fn ratios_follow_ieee_division() {
        let row = row();
        let [easy, hard, long] = row.recent_vs_baseline();
        assert_eq!(easy, 1.2);
        assert_eq!(hard, 1.25);
        assert!(long.is_nan());

        let within = row.recent.within_ratios();
        assert_eq!(within.hard_easy, 2.5);
        assert_eq!(within.long_hard, 0.0);
    }

    #[test]
    fn infinite_values_are_written_out() {
        let mut row = row();
        row.score.ratio = f64::INFINITY;
        let columns = column_names("TL");
        let idx = columns.iter().position(|c| c == "HASR-TL").unwrap();
        assert_eq!(row.cells()[idx], "inf");
    }

    #[test]
    fn serializes_stratum_by_name() {
        let json = serde_json::to_value(row()).unwrap();
        assert_eq!(json["session"]["stratum"], "Hard");
        assert_eq!(json["score"]["ratio"], 1.12);
    }
}
