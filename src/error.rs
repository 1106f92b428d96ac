//! Error types for simulation runs

use chrono::NaiveDate;
use thiserror::Error;

use crate::market::MarketDataError;

/// Errors that abort a simulation run
///
/// Every variant is terminal for the run: no partial trajectory is produced.
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Identifier is not part of the supported instrument catalog
    #[error("Unrecognized instrument: {0}")]
    UnrecognizedInstrument(String),

    /// Provider returned nothing usable for the requested range
    #[error("No data retrieved for {symbol} between {start} and {end}")]
    NoData {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
        #[source]
        cause: Option<MarketDataError>,
    },

    /// Series has no price field returns can be computed from
    #[error("Insufficient data to compute returns for {0}")]
    InsufficientData(String),

    /// Date range rejected at input validation
    #[error("Invalid date range: {start} to {end} ({reason})")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: String,
    },

    /// Numeric parameter outside its allowed domain
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl SimulationError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
