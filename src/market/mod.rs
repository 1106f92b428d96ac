//! Quote providers for historical price series
//!
//! A provider turns `(symbol, start, end, interval)` into a dated list of
//! price observations. Two implementations ship with the crate:
//! - [`YahooProvider`]: Yahoo Finance chart endpoint over HTTP
//! - [`CsvProvider`]: local CSV price files, for offline runs and tests
//!
//! [`fetch_with_retry`] wraps any provider with a bounded timeout and a
//! single retry on transient failures.

mod models;
mod yahoo;
mod csv_provider;

pub use models::{Interval, PriceField, PriceObservation};
pub use yahoo::{YahooProvider, DEFAULT_BASE_URL as YAHOO_BASE_URL};
pub use csv_provider::CsvProvider;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use thiserror::Error;

use crate::settings::{ProviderKind, ProviderSettings};

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Parsing error: {0}")]
    Parse(String),
    /// Server-side failure or throttling; worth another attempt
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl MarketDataError {
    /// Whether another attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Network(_)
            | MarketDataError::Timeout(_)
            | MarketDataError::Unavailable(_) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch observations with `start <= date < end`, ordered by date
    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<PriceObservation>, MarketDataError>;
}

/// Build the provider selected by `settings`
pub fn provider_from_settings(
    settings: &ProviderSettings,
) -> Result<Box<dyn QuoteProvider>, MarketDataError> {
    match settings.kind {
        ProviderKind::Yahoo => Ok(Box::new(YahooProvider::new(settings)?)),
        ProviderKind::Csv => {
            let path = settings.prices_path.as_ref().ok_or_else(|| {
                MarketDataError::Provider("CSV provider requires a prices path".to_string())
            })?;
            Ok(Box::new(CsvProvider::new(path)))
        }
    }
}

/// Fetch a series with a bounded timeout per attempt and up to
/// `settings.max_retries` additional attempts on transient errors
pub async fn fetch_with_retry(
    provider: &dyn QuoteProvider,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    settings: &ProviderSettings,
) -> Result<Vec<PriceObservation>, MarketDataError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        info!(
            "Fetching {} from {} ({} to {}), attempt {}",
            symbol,
            provider.name(),
            start,
            end,
            attempt
        );

        let fetch = provider.fetch_series(symbol, start, end, Interval::Monthly);
        let outcome = match tokio::time::timeout(settings.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(MarketDataError::Timeout(settings.timeout.as_secs())),
        };

        match outcome {
            Ok(observations) => return Ok(observations),
            Err(e) if e.is_transient() && attempt <= settings.max_retries => {
                warn!("Fetch of {} failed ({}), retrying", symbol, e);
            }
            Err(e) => return Err(e),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::time::Duration;

    fn settings(timeout_ms: u64, max_retries: u32) -> ProviderSettings {
        ProviderSettings {
            timeout: Duration::from_millis(timeout_ms),
            max_retries,
            ..ProviderSettings::default()
        }
    }

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_retry_recovers_from_single_timeout() {
        let provider = ScriptedProvider::new(vec![
            Err(MarketDataError::Timeout(1)),
            Ok(monthly_series(&[100.0, 101.0])),
        ]);
        let (start, end) = range();

        let series = fetch_with_retry(&provider, "SPY", start, end, &settings(1000, 1))
            .await
            .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_retry_is_bounded() {
        let provider = ScriptedProvider::new(vec![
            Err(MarketDataError::Timeout(1)),
            Err(MarketDataError::Timeout(1)),
            Ok(monthly_series(&[100.0, 101.0])),
        ]);
        let (start, end) = range();

        let result = fetch_with_retry(&provider, "SPY", start, end, &settings(1000, 1)).await;

        assert!(matches!(result, Err(MarketDataError::Timeout(_))));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_server_error() {
        let provider = ScriptedProvider::new(vec![
            Err(MarketDataError::Unavailable("503 Service Unavailable".into())),
            Ok(monthly_series(&[100.0, 101.0, 102.0])),
        ]);
        let (start, end) = range();

        let series = fetch_with_retry(&provider, "SPY", start, end, &settings(1000, 1))
            .await
            .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let provider = ScriptedProvider::new(vec![Err(MarketDataError::NotFound("XYZ".into()))]);
        let (start, end) = range();

        let result = fetch_with_retry(&provider, "XYZ", start, end, &settings(1000, 1)).await;

        assert!(matches!(result, Err(MarketDataError::NotFound(_))));
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_provider_from_settings() {
        let csv_without_path = ProviderSettings {
            kind: ProviderKind::Csv,
            ..ProviderSettings::default()
        };
        assert!(matches!(
            provider_from_settings(&csv_without_path),
            Err(MarketDataError::Provider(_))
        ));

        let csv = ProviderSettings {
            kind: ProviderKind::Csv,
            prices_path: Some(std::env::temp_dir().join("prices.csv")),
            ..ProviderSettings::default()
        };
        assert_eq!(provider_from_settings(&csv).unwrap().name(), "CSV");
    }

    #[tokio::test]
    async fn test_stalled_provider_times_out() {
        let (start, end) = range();

        let result = fetch_with_retry(&StalledProvider, "SPY", start, end, &settings(20, 1)).await;

        assert!(matches!(result, Err(MarketDataError::Timeout(_))));
    }
}
