//! Date ranges for historical runs and quick-duration presets

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SimulationError};

/// Earliest start date accepted for a custom range
pub const EARLIEST_START: (i32, u32, u32) = (2000, 1, 1);

/// Default custom range offered to a new session
pub const DEFAULT_CUSTOM_START: (i32, u32, u32) = (2010, 1, 1);
pub const DEFAULT_CUSTOM_END: (i32, u32, u32) = (2024, 12, 31);

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Validated `[start, end]` pair with `end >= start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(SimulationError::InvalidRange {
                start,
                end,
                reason: "end date is before start date".to_string(),
            });
        }
        if start < ymd(EARLIEST_START) {
            return Err(SimulationError::InvalidRange {
                start,
                end,
                reason: format!("start date is before {}", ymd(EARLIEST_START)),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: ymd(DEFAULT_CUSTOM_START),
            end: ymd(DEFAULT_CUSTOM_END),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Trailing windows ending today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationPreset {
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
}

impl DurationPreset {
    pub fn years(&self) -> u32 {
        match self {
            DurationPreset::OneYear => 1,
            DurationPreset::TwoYears => 2,
            DurationPreset::FiveYears => 5,
            DurationPreset::TenYears => 10,
        }
    }

    /// `[today - years * 365 days, today]`; leap days are not counted
    pub fn range_ending(&self, today: NaiveDate) -> DateRange {
        let days = u64::from(self.years()) * 365;
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        DateRange { start, end: today }
    }
}
