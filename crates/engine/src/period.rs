//! Named reporting periods and the inclusive windows they map to.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Inclusive `[start, end]` timestamp range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    /// Builds a window, rejecting `start > end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, EngineError> {
        if start > end {
            return Err(EngineError::InvalidValue(format!(
                "window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Window ending at `now`:
    ///
    /// - `Today`: midnight of `now`'s day;
    /// - `Week`: midnight of the most recent Monday (today, if Monday);
    /// - `Month`: midnight of the first day of `now`'s month;
    /// - `All`: no bound.
    #[must_use]
    pub fn window(self, now: NaiveDateTime) -> Option<Window> {
        let today = now.date();
        let start_day = match self {
            Self::Today => today,
            Self::Week => {
                today - TimeDelta::days(i64::from(today.weekday().num_days_from_monday()))
            }
            Self::Month => today.with_day(1).unwrap_or(today),
            Self::All => return None,
        };
        Some(Window {
            start: start_day.and_hms_opt(0, 0, 0)?,
            end: now,
        })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" | "sum" => Ok(Self::All),
            other => Err(EngineError::InvalidValue(format!("unknown period: {other}"))),
        }
    }
}
