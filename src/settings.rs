//! Runtime settings read from the environment
//!
//! Recognised variables:
//!   SIMULATOR_PROVIDER (yahoo | csv), SIMULATOR_PRICES_PATH,
//!   SIMULATOR_TIMEOUT_SECS, SIMULATOR_MAX_RETRIES,
//!   SIMULATOR_YAHOO_BASE_URL, SIMULATOR_CURRENCY

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::market::YAHOO_BASE_URL;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 1;
pub const DEFAULT_CURRENCY: &str = "€";

/// Which quote provider backs historical runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Csv,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yahoo" => Ok(ProviderKind::Yahoo),
            "csv" => Ok(ProviderKind::Csv),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    /// Price file or directory for the CSV provider
    pub prices_path: Option<PathBuf>,
    /// Per-attempt fetch timeout
    pub timeout: Duration,
    /// Extra attempts after a transient failure
    pub max_retries: u32,
    pub yahoo_base_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            prices_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            yahoo_base_url: YAHOO_BASE_URL.to_string(),
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl ProviderSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let prices_path = env::var("SIMULATOR_PRICES_PATH").ok().map(PathBuf::from);
        // A prices path alone implies the CSV provider
        let kind = env_parse("SIMULATOR_PROVIDER").unwrap_or(if prices_path.is_some() {
            ProviderKind::Csv
        } else {
            defaults.kind
        });

        Self {
            kind,
            prices_path,
            timeout: env_parse("SIMULATOR_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            max_retries: env_parse("SIMULATOR_MAX_RETRIES").unwrap_or(defaults.max_retries),
            yahoo_base_url: env::var("SIMULATOR_YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
        }
    }
}

/// Currency symbol appended to formatted amounts
pub fn currency_from_env() -> String {
    env::var("SIMULATOR_CURRENCY").unwrap_or_else(|_| DEFAULT_CURRENCY.to_string())
}
