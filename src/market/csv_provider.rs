//! Offline provider backed by CSV price files
//!
//! Expected columns: `date,close,adj_close` with ISO dates. Either price
//! column may be absent or left empty on a row.

use async_trait::async_trait;
use chrono::NaiveDate;
use csv::Reader;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{Interval, MarketDataError, PriceObservation, QuoteProvider};

/// Raw CSV row of a price file
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    #[serde(default, alias = "Close")]
    close: Option<f64>,
    #[serde(default, alias = "Adj Close", alias = "adjusted_close")]
    adj_close: Option<f64>,
}

impl From<CsvRow> for PriceObservation {
    fn from(row: CsvRow) -> Self {
        PriceObservation::new(row.date, row.close, row.adj_close)
    }
}

/// Where price files are looked up
#[derive(Debug, Clone)]
enum Source {
    /// `<dir>/<SYMBOL>.csv`
    Directory(PathBuf),
    /// One file answering for every symbol
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct CsvProvider {
    source: Source,
}

impl CsvProvider {
    /// A directory is searched per symbol; a file serves every symbol
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let source = if path.is_dir() {
            Source::Directory(path)
        } else {
            Source::File(path)
        };
        Self { source }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        match &self.source {
            Source::Directory(dir) => dir.join(format!("{}.csv", symbol)),
            Source::File(file) => file.clone(),
        }
    }
}

/// Load observations from any reader (e.g., string buffer, file)
pub fn load_observations_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PriceObservation>, MarketDataError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut observations = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        observations.push(row.into());
    }

    observations.sort_by_key(|o: &PriceObservation| o.date);
    Ok(observations)
}

#[async_trait]
impl QuoteProvider for CsvProvider {
    fn name(&self) -> &'static str {
        "CSV"
    }

    async fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        _interval: Interval,
    ) -> Result<Vec<PriceObservation>, MarketDataError> {
        let path = self.path_for(symbol);
        if !path.exists() {
            return Err(MarketDataError::NotFound(format!(
                "{} (no price file at {})",
                symbol,
                path.display()
            )));
        }

        let file = std::fs::File::open(&path)?;
        let observations = load_observations_from_reader(file)?;

        Ok(observations
            .into_iter()
            .filter(|o| o.date >= start && o.date < end)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PRICES: &str = "date,close,adj_close\n\
        2020-03-01,110.0,108.0\n\
        2020-01-01,100.0,98.0\n\
        2020-02-01,105.0,\n";

    #[test]
    fn test_load_from_reader_sorts_and_keeps_gaps() {
        let observations = load_observations_from_reader(PRICES.as_bytes()).unwrap();

        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(observations[1].adjusted_close, None);
        assert_eq!(observations[2].close, Some(110.0));
    }

    #[test]
    fn test_load_close_only_file() {
        let data = "date,close\n2021-01-01,1.0\n2021-02-01,2.0\n";
        let observations = load_observations_from_reader(data.as_bytes()).unwrap();

        assert!(observations.iter().all(|o| o.adjusted_close.is_none()));
        assert_eq!(observations[1].close, Some(2.0));
    }

    #[test]
    fn test_malformed_row_is_rejected() {
        let data = "date,close\nnot-a-date,1.0\n";
        assert!(matches!(
            load_observations_from_reader(data.as_bytes()),
            Err(MarketDataError::Csv(_))
        ));
    }

    #[tokio::test]
    async fn test_directory_lookup_and_range_filter() {
        let dir = std::env::temp_dir().join(format!("csv_provider_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("SPY.csv"), PRICES).unwrap();

        let provider = CsvProvider::new(&dir);
        let series = provider
            .fetch_series(
                "SPY",
                NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
                Interval::Monthly,
            )
            .await
            .unwrap();
        let missing = provider
            .fetch_series(
                "QQQ",
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                Interval::Monthly,
            )
            .await;

        fs::remove_dir_all(&dir).ok();

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
        assert!(matches!(missing, Err(MarketDataError::NotFound(_))));
    }
}
