use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} window must span at least one day")]
    EmptyWindow(&'static str),
    #[error("{name} window may span at most {} days, got {days}", MAX_WINDOW_DAYS)]
    WindowTooLong { name: &'static str, days: u32 },
    #[error("decay lambda must be in (0, 1), got {0}")]
    InvalidDecay(f64),
    #[error("{name} quantile must be in [0, 1], got {value}")]
    InvalidQuantile { name: &'static str, value: f64 },
    #[error("stratum weights must be finite and non-negative, got {0:?}")]
    InvalidStratumWeights(StratumWeights),
}

/// Ten years.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Relative importance of each stratum in the composite load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StratumWeights {
    pub easy: f64,
    pub hard: f64,
    pub long: f64,
}

impl Default for StratumWeights {
    fn default() -> Self {
        Self {
            easy: 0.15,
            hard: 0.45,
            long: 0.40,
        }
    }
}

impl StratumWeights {
    fn is_valid(&self) -> bool {
        [self.easy, self.hard, self.long]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HasrConfig {
    pub baseline_window_days: u32,
    pub recent_window_days: u32,
    pub decay_lambda: f64,
    pub stratum_weights: StratumWeights,
    /// Load-per-minute quantile above which a session is Hard.
    pub quantile_hard: f64,
    /// Duration quantile (of non-Hard sessions) above which a session is Long.
    pub quantile_long: f64,
    pub aggregate_variable: String,
}

impl Default for HasrConfig {
    fn default() -> Self {
        Self {
            baseline_window_days: 90,
            recent_window_days: 21,
            decay_lambda: 0.978,
            stratum_weights: StratumWeights::default(),
            quantile_hard: 0.70,
            quantile_long: 0.80,
            aggregate_variable: "Training load".to_string(),
        }
    }
}

impl HasrConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baseline_window_days == 0 {
            return Err(ConfigError::EmptyWindow("baseline"));
        }
        if self.recent_window_days == 0 {
            return Err(ConfigError::EmptyWindow("recent"));
        }
        for (name, days) in [
            ("baseline", self.baseline_window_days),
            ("recent", self.recent_window_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(ConfigError::WindowTooLong { name, days });
            }
        }
        if !(self.decay_lambda > 0.0 && self.decay_lambda < 1.0) {
            return Err(ConfigError::InvalidDecay(self.decay_lambda));
        }
        for (name, value) in [("hard", self.quantile_hard), ("long", self.quantile_long)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidQuantile { name, value });
            }
        }
        if !self.stratum_weights.is_valid() {
            return Err(ConfigError::InvalidStratumWeights(self.stratum_weights));
        }
        Ok(())
    }

    /// Short name used in the HASR column headers, "Training load" -> "TL".
    pub fn aggregate_abbreviation(&self) -> String {
        self.aggregate_variable
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HasrConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.aggregate_abbreviation(), "TL");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = HasrConfig {
            recent_window_days: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyWindow("recent")));

        let config = HasrConfig {
            baseline_window_days: 100_000_000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::WindowTooLong {
                name: "baseline",
                days: 100_000_000
            })
        );

        let config = HasrConfig {
            baseline_window_days: MAX_WINDOW_DAYS,
            recent_window_days: MAX_WINDOW_DAYS,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        let config = HasrConfig {
            decay_lambda: 1.0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidDecay(1.0)));

        let config = HasrConfig {
            quantile_long: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidQuantile {
                name: "long",
                value: 1.5
            })
        );

        let config = HasrConfig {
            stratum_weights: StratumWeights {
                easy: -0.1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidStratumWeights(_))
        ));
    }

    #[test]
    fn abbreviation_of_other_variables() {
        let config = HasrConfig {
            aggregate_variable: "calories burned".to_string(),
            ..Default::default()
        };
        assert_eq!(config.aggregate_abbreviation(), "CB");
    }
}
