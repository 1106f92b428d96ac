//! Yahoo Finance chart endpoint provider

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{Interval, MarketDataError, PriceObservation, QuoteProvider};
use crate::settings::ProviderSettings;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("investment_simulator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.yahoo_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds; bars are stamped at local midnight
    #[serde(default)]
    gmtoffset: i32,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
    #[serde(default)]
    adjclose: Vec<AdjCloseIndicator>,
}

#[derive(Debug, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseIndicator {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Convert a decoded chart payload into observations
///
/// An empty `result` list and a "Not Found" error both mean the symbol is
/// unknown to Yahoo.
fn parse_chart(symbol: &str, body: &str) -> Result<Vec<PriceObservation>, MarketDataError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::Parse(format!("Failed to parse chart for {}: {}", symbol, e)))?;

    if let Some(error) = response.chart.error {
        let detail = error.description.unwrap_or_default();
        return Err(if error.code.eq_ignore_ascii_case("not found") {
            MarketDataError::NotFound(format!("{}: {}", symbol, detail))
        } else {
            MarketDataError::Provider(format!("{}: {}", error.code, detail))
        });
    }

    let result = match response.chart.result.and_then(|r| r.into_iter().next()) {
        Some(result) => result,
        None => return Err(MarketDataError::NotFound(symbol.to_string())),
    };

    let closes = result.indicators.quote.into_iter().next().map(|q| q.close);
    let adjusted = result.indicators.adjclose.into_iter().next().map(|a| a.adjclose);

    let exchange_tz = FixedOffset::east_opt(result.meta.gmtoffset).ok_or_else(|| {
        MarketDataError::Parse(format!("Invalid gmtoffset {}", result.meta.gmtoffset))
    })?;

    let mut observations = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let date = DateTime::from_timestamp(*ts, 0)
            .ok_or_else(|| MarketDataError::Parse(format!("Invalid timestamp {}", ts)))?
            .with_timezone(&exchange_tz)
            .date_naive();
        let close = closes.as_ref().and_then(|c| c.get(i).copied().flatten());
        let adjusted_close = adjusted.as_ref().and_then(|a| a.get(i).copied().flatten());
        observations.push(PriceObservation::new(date, close, adjusted_close));
    }

    observations.sort_by_key(|o| o.date);
    Ok(observations)
}

/// Error for a non-success response
fn status_error(symbol: &str, status: StatusCode, body: &str) -> MarketDataError {
    if status == StatusCode::NOT_FOUND {
        // Yahoo still sends a chart error payload with 404
        return match parse_chart(symbol, body) {
            Err(e @ MarketDataError::NotFound(_)) => e,
            _ => MarketDataError::NotFound(symbol.to_string()),
        };
    }
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return MarketDataError::Unavailable(format!("Yahoo returned {} for {}", status, symbol));
    }
    MarketDataError::Provider(format!("Yahoo chart request for {} failed: {}", symbol, status))
}

fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn name(&self) -> &'static str {
        "YAHOO"
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<PriceObservation>, MarketDataError> {
        let url = format!("{}/{}", self.base_url, symbol);
        let params = [
            ("period1", unix_seconds(start).to_string()),
            ("period2", unix_seconds(end).to_string()),
            ("interval", interval.as_api_value().to_string()),
            ("events", "div,splits".to_string()),
            ("includeAdjustedClose", "true".to_string()),
        ];

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Yahoo responded {} for {} ({} bytes)", status, symbol, body.len());

        if !status.is_success() {
            return Err(status_error(symbol, status, &body));
        }

        // period1/period2 already bound the bars server-side
        parse_chart(symbol, &body)
    }
}
