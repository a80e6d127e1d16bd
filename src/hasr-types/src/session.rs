use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid duration {0} h, expected a finite non-negative value")]
    InvalidDuration(f64),
    #[error("invalid load {0}, expected a finite non-negative value")]
    InvalidLoad(f64),
}

/// One training activity as read from the activity log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub start: NaiveDateTime,
    pub duration_hours: f64,
    /// Value of the aggregate variable (e.g. "Training load").
    pub load: f64,
    pub description: String,
    pub activity_type: String,
}

impl Session {
    pub fn new(
        start: NaiveDateTime,
        duration_hours: f64,
        load: f64,
        description: impl Into<String>,
        activity_type: impl Into<String>,
    ) -> Result<Self, SessionError> {
        if !duration_hours.is_finite() || duration_hours < 0.0 {
            return Err(SessionError::InvalidDuration(duration_hours));
        }
        if !load.is_finite() || load < 0.0 {
            return Err(SessionError::InvalidLoad(load));
        }

        Ok(Self {
            start,
            duration_hours,
            load,
            description: description.into(),
            activity_type: activity_type.into(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Load per minute of activity, 0 for sessions without a duration.
    pub fn load_per_minute(&self) -> f64 {
        if self.duration_hours == 0.0 {
            0.0
        } else {
            self.load / (self.duration_hours * 60.0)
        }
    }
}
