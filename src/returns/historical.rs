//! Returns derived from a fetched price history

use log::{debug, warn};

use super::{DateRange, Granularity, Instrument, InstrumentCatalog, Period, ReturnSeries};
use crate::error::{Result, SimulationError};
use crate::market::{fetch_with_retry, PriceField, PriceObservation, QuoteProvider};
use crate::settings::ProviderSettings;

/// A catalog instrument over a validated date range
#[derive(Debug, Clone)]
pub struct HistoricalRequest {
    instrument: Instrument,
    range: DateRange,
}

impl HistoricalRequest {
    /// Resolve `identifier` against the catalog
    pub fn new(catalog: &InstrumentCatalog, identifier: &str, range: DateRange) -> Result<Self> {
        let instrument = *catalog.resolve(identifier)?;
        Ok(Self { instrument, range })
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Fetch monthly prices and turn them into returns
    ///
    /// Any provider failure surfaces as `NoData` with the provider error as
    /// its source.
    pub async fn fetch(
        &self,
        provider: &dyn QuoteProvider,
        settings: &ProviderSettings,
    ) -> Result<ReturnSeries> {
        let symbol = self.instrument.symbol;
        let observations =
            fetch_with_retry(provider, symbol, self.range.start(), self.range.end(), settings)
                .await
                .map_err(|e| {
                    warn!("Quote provider {} failed for {}: {}", provider.name(), symbol, e);
                    self.no_data(Some(e))
                })?;

        self.derive(observations)
    }

    /// Period-over-period change of the preferred price field
    ///
    /// The first usable observation has no predecessor and only labels the
    /// origin. Every later observation yields exactly one return.
    pub fn derive(&self, mut observations: Vec<PriceObservation>) -> Result<ReturnSeries> {
        if observations.is_empty() {
            return Err(self.no_data(None));
        }
        observations.sort_by_key(|o| o.date);

        let symbol = self.instrument.symbol;
        let field = PriceField::select(&observations)
            .ok_or_else(|| SimulationError::InsufficientData(symbol.to_string()))?;

        // A gap after the first usable price repeats it: a flat period
        let mut last_price: Option<f64> = None;
        let mut origin = None;
        let mut entries = Vec::with_capacity(observations.len());
        for o in &observations {
            let price = match field.read(o) {
                Some(price) if price.is_finite() && price > 0.0 => Some(price),
                other => {
                    warn!("Unusable {} price on {}: {:?}", symbol, o.date, other);
                    None
                }
            };

            match (last_price, price) {
                (None, None) => {}
                (None, Some(p)) => {
                    origin = Some(Period::Date(o.date));
                    last_price = Some(p);
                }
                (Some(prev), Some(p)) => {
                    entries.push((Period::Date(o.date), p / prev - 1.0));
                    last_price = Some(p);
                }
                (Some(_), None) => entries.push((Period::Date(o.date), 0.0)),
            }
        }

        let origin = origin.ok_or_else(|| SimulationError::InsufficientData(symbol.to_string()))?;

        debug!(
            "Derived {} returns for {} from {:?} ({} observations)",
            entries.len(),
            symbol,
            field,
            observations.len()
        );

        Ok(ReturnSeries::new(Granularity::Observed, origin, entries))
    }

    fn no_data(&self, cause: Option<crate::market::MarketDataError>) -> SimulationError {
        SimulationError::NoData {
            symbol: self.instrument.symbol.to_string(),
            start: self.range.start(),
            end: self.range.end(),
            cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::testing::{monthly_series, ScriptedProvider};
    use crate::market::MarketDataError;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(identifier: &str) -> Result<HistoricalRequest> {
        let range = DateRange::new(date(2020, 1, 1), date(2021, 1, 1)).unwrap();
        HistoricalRequest::new(&InstrumentCatalog::default(), identifier, range)
    }

    #[test]
    fn test_unrecognized_instrument() {
        assert!(matches!(
            request("Unknown Fund"),
            Err(SimulationError::UnrecognizedInstrument(_))
        ));
    }

    #[test]
    fn test_first_observation_is_dropped() {
        let req = request("SPY").unwrap();
        let series = req.derive(monthly_series(&[100.0, 110.0, 99.0])).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.origin(), Period::Date(date(2020, 1, 1)));

        let entries: Vec<_> = series.iter().copied().collect();
        assert_eq!(entries[0].0, Period::Date(date(2020, 2, 1)));
        assert_relative_eq!(entries[0].1, 0.10, max_relative = 1e-12);
        assert_eq!(entries[1].0, Period::Date(date(2020, 3, 1)));
        assert_relative_eq!(entries[1].1, -0.10, max_relative = 1e-12);
    }

    #[test]
    fn test_adjusted_close_wins_over_close() {
        let req = request("SPY").unwrap();
        let observations = vec![
            PriceObservation::new(date(2020, 1, 1), Some(100.0), Some(50.0)),
            PriceObservation::new(date(2020, 2, 1), Some(100.0), Some(55.0)),
        ];

        let series = req.derive(observations).unwrap();
        assert_relative_eq!(series.returns().next().unwrap(), 0.10, max_relative = 1e-12);
    }

    #[test]
    fn test_no_price_field_is_insufficient() {
        let req = request("SPY").unwrap();
        let observations = vec![
            PriceObservation::new(date(2020, 1, 1), None, None),
            PriceObservation::new(date(2020, 2, 1), None, None),
        ];

        assert!(matches!(
            req.derive(observations),
            Err(SimulationError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_gap_carries_previous_price() {
        let req = request("SPY").unwrap();
        let observations = vec![
            PriceObservation::new(date(2020, 3, 1), Some(121.0), None),
            PriceObservation::new(date(2020, 1, 1), Some(100.0), None),
            PriceObservation::new(date(2020, 2, 1), None, None),
        ];

        let series = req.derive(observations).unwrap();
        let entries: Vec<_> = series.iter().copied().collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (Period::Date(date(2020, 2, 1)), 0.0));
        assert_eq!(entries[1].0, Period::Date(date(2020, 3, 1)));
        assert_relative_eq!(entries[1].1, 0.21, max_relative = 1e-12);
    }

    #[test]
    fn test_leading_gap_moves_origin() {
        let req = request("SPY").unwrap();
        let observations = vec![
            PriceObservation::new(date(2020, 1, 1), Some(0.0), None),
            PriceObservation::new(date(2020, 2, 1), Some(100.0), None),
            PriceObservation::new(date(2020, 3, 1), Some(105.0), None),
        ];

        let series = req.derive(observations).unwrap();
        assert_eq!(series.origin(), Period::Date(date(2020, 2, 1)));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_no_usable_price_is_insufficient() {
        let req = request("SPY").unwrap();
        let observations = vec![
            PriceObservation::new(date(2020, 1, 1), Some(-1.0), None),
            PriceObservation::new(date(2020, 2, 1), Some(f64::NAN), None),
        ];

        assert!(matches!(
            req.derive(observations),
            Err(SimulationError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_single_observation_gives_empty_series() {
        let req = request("SPY").unwrap();
        let series = req.derive(monthly_series(&[100.0])).unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_empty_provider_result_is_no_data() {
        let req = request("SPY").unwrap();
        let provider = ScriptedProvider::returning(Vec::new());

        let result = req.fetch(&provider, &ProviderSettings::default()).await;
        assert!(matches!(result, Err(SimulationError::NoData { cause: None, .. })));
    }

    #[tokio::test]
    async fn test_provider_failure_is_no_data() {
        let req = request("SPY").unwrap();
        let provider = ScriptedProvider::new(vec![Err(MarketDataError::NotFound("SPY".into()))]);

        let result = req.fetch(&provider, &ProviderSettings::default()).await;
        assert!(matches!(
            result,
            Err(SimulationError::NoData { cause: Some(MarketDataError::NotFound(_)), .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_passes_catalog_symbol() {
        let req = request("Bitcoin (BTC)").unwrap();
        let provider = ScriptedProvider::returning(monthly_series(&[10.0, 20.0, 30.0]));

        let series = req.fetch(&provider, &ProviderSettings::default()).await.unwrap();
        assert_eq!(req.instrument().symbol, "BTC-USD");
        assert_eq!(series.len(), 2);
    }
}
