//! Return sources: where per-period returns come from
//!
//! Both variants produce a [`ReturnSeries`] that the projection engine
//! consumes without knowing its origin:
//! - [`FixedRate`]: constant return from an annual rate, computed locally
//! - [`HistoricalRequest`]: month-over-month price changes of a catalog
//!   instrument, fetched through a [`QuoteProvider`]

mod catalog;
mod fixed;
mod historical;
mod range;

pub use catalog::{Instrument, InstrumentCatalog, SUPPORTED_INSTRUMENTS};
pub use fixed::FixedRate;
pub use historical::HistoricalRequest;
pub use range::{DateRange, DurationPreset};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::market::QuoteProvider;
use crate::plan::InvestmentPlan;
use crate::settings::ProviderSettings;

/// Length of one compounding step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Yearly,
    Monthly,
    /// Spacing of the provider's observations
    Observed,
}

impl Granularity {
    pub fn axis_label(&self) -> &'static str {
        match self {
            Granularity::Yearly => "Years",
            Granularity::Monthly => "Months",
            Granularity::Observed => "Date",
        }
    }
}

/// Position of a row in a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Period {
    Year(u32),
    Month(u32),
    Date(NaiveDate),
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(y) => write!(f, "Year {}", y),
            Period::Month(m) => write!(f, "Month {}", m),
            Period::Date(d) => write!(f, "{}", d.format("%b %Y")),
        }
    }
}

/// Ordered returns, each labelled with the period it closes
///
/// `origin` labels the starting state, before any return is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    granularity: Granularity,
    origin: Period,
    entries: Vec<(Period, f64)>,
}

impl ReturnSeries {
    pub fn new(granularity: Granularity, origin: Period, entries: Vec<(Period, f64)>) -> Self {
        Self {
            granularity,
            origin,
            entries,
        }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn origin(&self) -> Period {
        self.origin
    }

    /// Number of returns (one fewer than the trajectory length)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn returns(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, r)| *r)
    }

    /// Every period label, origin first
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        std::iter::once(self.origin).chain(self.entries.iter().map(|(p, _)| *p))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Period, f64)> {
        self.entries.iter()
    }
}

/// The two ways of obtaining returns
#[derive(Debug, Clone)]
pub enum ReturnSource {
    Fixed(FixedRate),
    Historical(HistoricalRequest),
}

impl ReturnSource {
    /// Produce the return series; only the historical variant touches the provider
    ///
    /// A fixed rate takes its compounding step from the plan's contribution.
    pub async fn resolve(
        &self,
        plan: &InvestmentPlan,
        provider: &dyn QuoteProvider,
        settings: &ProviderSettings,
    ) -> Result<ReturnSeries> {
        match self {
            ReturnSource::Fixed(fixed) => Ok(fixed.series(plan)),
            ReturnSource::Historical(request) => request.fetch(provider, settings).await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ReturnSource::Fixed(fixed) => format!(
                "{:.2}% per year over {} years",
                fixed.annual_rate_percent, fixed.duration_years
            ),
            ReturnSource::Historical(request) => format!(
                "{} ({}) from {}",
                request.instrument().name,
                request.instrument().symbol,
                request.range()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_display() {
        assert_eq!(Period::Year(3).to_string(), "Year 3");
        assert_eq!(Period::Month(12).to_string(), "Month 12");
        assert_eq!(
            Period::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()).to_string(),
            "Feb 2024"
        );
    }

    #[test]
    fn test_periods_include_origin() {
        let series = ReturnSeries::new(
            Granularity::Monthly,
            Period::Month(0),
            vec![(Period::Month(1), 0.01), (Period::Month(2), -0.02)],
        );

        let periods: Vec<_> = series.periods().collect();
        assert_eq!(periods, vec![Period::Month(0), Period::Month(1), Period::Month(2)]);
        assert_eq!(series.returns().collect::<Vec<_>>(), vec![0.01, -0.02]);
    }

    #[tokio::test]
    async fn test_fixed_source_ignores_provider() {
        let provider = crate::market::testing::StalledProvider;
        let source = ReturnSource::Fixed(FixedRate::new(5.0, 2));
        let plan = InvestmentPlan::new(1000.0, 0.0).unwrap();

        let series = source
            .resolve(&plan, &provider, &ProviderSettings::default())
            .await
            .unwrap();
        assert_eq!(series.len(), 2);
    }
}
