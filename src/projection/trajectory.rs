//! Projection output: one row per period plus summary extraction

use serde::{Deserialize, Serialize};

use crate::returns::{Granularity, Period};

/// State of the investment at the end of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRow {
    pub period: Period,

    /// Return applied in this period (0 on the origin row)
    pub period_return: f64,

    /// Growth earned in this period alone
    pub interest_earned: f64,

    pub capital: f64,
    pub contributions: f64,
    /// Cumulative growth: `capital - contributions`
    pub interest: f64,
}

/// Capital, contribution and interest series of a run, aligned by period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub granularity: Granularity,
    pub rows: Vec<TrajectoryRow>,
}

impl Trajectory {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            rows: Vec::new(),
        }
    }

    /// Add a row
    pub fn add_row(&mut self, row: TrajectoryRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn periods(&self) -> Vec<Period> {
        self.rows.iter().map(|r| r.period).collect()
    }

    pub fn capital(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.capital).collect()
    }

    pub fn contributions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.contributions).collect()
    }

    pub fn interest(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.interest).collect()
    }

    /// Final values of the three series
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.rows.last();

        ProjectionSummary {
            periods: self.rows.len().saturating_sub(1) as u32,
            granularity: self.granularity,
            final_capital: last.map(|r| r.capital).unwrap_or(0.0),
            total_contributions: last.map(|r| r.contributions).unwrap_or(0.0),
            total_interest: last.map(|r| r.interest).unwrap_or(0.0),
        }
    }
}

/// Display-ready final values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Number of returns applied
    pub periods: u32,
    pub granularity: Granularity,
    pub final_capital: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
}
