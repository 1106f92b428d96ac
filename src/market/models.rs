//! Price observation types shared by quote providers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sampling interval requested from a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Monthly,
}

impl Interval {
    /// Interval code used by the Yahoo chart endpoint
    pub fn as_api_value(&self) -> &'static str {
        match self {
            Interval::Monthly => "1mo",
        }
    }
}

/// One dated price observation
///
/// Either price field may be missing depending on the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub close: Option<f64>,
    pub adjusted_close: Option<f64>,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, close: Option<f64>, adjusted_close: Option<f64>) -> Self {
        Self {
            date,
            close,
            adjusted_close,
        }
    }
}

/// Price field returns are computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceField {
    AdjustedClose,
    Close,
}

impl PriceField {
    /// Pick the field for a whole series: adjusted close when the series
    /// carries it, raw close otherwise
    pub fn select(observations: &[PriceObservation]) -> Option<Self> {
        if observations.iter().any(|o| o.adjusted_close.is_some()) {
            Some(PriceField::AdjustedClose)
        } else if observations.iter().any(|o| o.close.is_some()) {
            Some(PriceField::Close)
        } else {
            None
        }
    }

    pub fn read(&self, observation: &PriceObservation) -> Option<f64> {
        match self {
            PriceField::AdjustedClose => observation.adjusted_close,
            PriceField::Close => observation.close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(day: u32, close: Option<f64>, adj: Option<f64>) -> PriceObservation {
        PriceObservation::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), close, adj)
    }

    #[test]
    fn test_adjusted_close_preferred() {
        let series = vec![obs(1, Some(10.0), None), obs(2, Some(11.0), Some(10.5))];
        assert_eq!(PriceField::select(&series), Some(PriceField::AdjustedClose));
    }

    #[test]
    fn test_close_fallback_and_missing_fields() {
        let series = vec![obs(1, Some(10.0), None)];
        assert_eq!(PriceField::select(&series), Some(PriceField::Close));

        let empty_fields = vec![obs(1, None, None), obs(2, None, None)];
        assert_eq!(PriceField::select(&empty_fields), None);
    }
}
