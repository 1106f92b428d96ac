//! Supported instruments for historical runs

use serde::Serialize;

use crate::error::{Result, SimulationError};

/// A selectable instrument: display name and provider symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Instrument {
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn instrument(name: &'static str, symbol: &'static str) -> Instrument {
    Instrument { name, symbol }
}

/// Built-in catalog, in display order
pub const SUPPORTED_INSTRUMENTS: &[Instrument] = &[
    instrument("Gold (Spot USD)", "GC=F"),
    instrument("MSCI World (ETF)", "CW8.PA"),
    instrument("S&P 500 (ETF)", "SPY"),
    instrument("Nasdaq 100 (ETF)", "QQQ"),
    instrument("Dow Jones (ETF)", "DIA"),
    instrument("FTSE 100 (ETF)", "EWU"),
    instrument("CAC 40 (ETF)", "EWQ"),
    instrument("DAX 30 (ETF)", "EWG"),
    instrument("Euro Stoxx 50 (ETF)", "FEZ"),
    instrument("Nikkei 225 (ETF)", "EWJ"),
    instrument("Tesla (Stock)", "TSLA"),
    instrument("Apple (Stock)", "AAPL"),
    instrument("Amazon (Stock)", "AMZN"),
    instrument("Microsoft (Stock)", "MSFT"),
    instrument("Google (Stock)", "GOOGL"),
    instrument("Meta (Stock)", "META"),
    instrument("Intel (Stock)", "INTC"),
    instrument("NVIDIA (Stock)", "NVDA"),
    instrument("Pfizer (Stock)", "PFE"),
    instrument("JPMorgan Chase (Stock)", "JPM"),
    instrument("Bitcoin (BTC)", "BTC-USD"),
    instrument("Ethereum (ETH)", "ETH-USD"),
    instrument("Ripple (XRP)", "XRP-USD"),
    instrument("Cardano (ADA)", "ADA-USD"),
    instrument("Solana (SOL)", "SOL-USD"),
    instrument("Polkadot (DOT)", "DOT-USD"),
    instrument("Uniswap (UNI)", "UNI-USD"),
    instrument("Dogecoin (DOGE)", "DOGE-USD"),
    instrument("Avalanche (AVAX)", "AVAX-USD"),
    instrument("L'Oréal (CAC 40)", "OR.PA"),
    instrument("TotalEnergies (CAC 40)", "TTE.PA"),
    instrument("LVMH (CAC 40)", "MC.PA"),
    instrument("Airbus (CAC 40)", "AIR.PA"),
    instrument("Danone (CAC 40)", "BN.PA"),
    instrument("Kering (CAC 40)", "KER.PA"),
    instrument("BNP Paribas (CAC 40)", "BNP.PA"),
    instrument("Société Générale (CAC 40)", "GLE.PA"),
    instrument("AXA (CAC 40)", "CS.PA"),
    instrument("Engie (CAC 40)", "ENGI.PA"),
    instrument("Orange (CAC 40)", "ORA.PA"),
    instrument("Vivendi (CAC 40)", "VIV.PA"),
    instrument("Dassault Systèmes (CAC 40)", "DSY.PA"),
    instrument("Schneider Electric (CAC 40)", "SU.PA"),
    instrument("Saint-Gobain (CAC 40)", "SGO.PA"),
    instrument("Veolia (CAC 40)", "VEOEY.PA"),
    instrument("Michelin (CAC 40)", "ML.PA"),
    instrument("Carrefour (CAC 40)", "CA.PA"),
    instrument("Capgemini (CAC 40)", "CAP.PA"),
    instrument("Hermès (CAC 40)", "RMS.PA"),
    instrument("Renault (CAC 40)", "RNO.PA"),
    instrument("Bouygues (CAC 40)", "EN.PA"),
    instrument("Legrand (CAC 40)", "LR.PA"),
    instrument("STMicroelectronics (CAC 40)", "STM.PA"),
];

/// Lookup table over a fixed set of instruments
#[derive(Debug, Clone)]
pub struct InstrumentCatalog {
    instruments: Vec<Instrument>,
}

impl InstrumentCatalog {
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }

    /// Resolve a display name (case-insensitive) or an exact ticker
    pub fn resolve(&self, identifier: &str) -> Result<&Instrument> {
        let wanted = identifier.trim();
        self.instruments
            .iter()
            .find(|i| i.name.to_lowercase() == wanted.to_lowercase())
            .or_else(|| {
                self.instruments
                    .iter()
                    .find(|i| i.symbol.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| SimulationError::UnrecognizedInstrument(identifier.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl Default for InstrumentCatalog {
    fn default() -> Self {
        Self::new(SUPPORTED_INSTRUMENTS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_name_and_symbol() {
        let catalog = InstrumentCatalog::default();

        assert_eq!(catalog.resolve("S&P 500 (ETF)").unwrap().symbol, "SPY");
        assert_eq!(catalog.resolve("  s&p 500 (etf) ").unwrap().symbol, "SPY");
        assert_eq!(catalog.resolve("btc-usd").unwrap().name, "Bitcoin (BTC)");
        assert_eq!(catalog.resolve("Hermès (CAC 40)").unwrap().symbol, "RMS.PA");
    }

    #[test]
    fn test_unknown_instrument() {
        let catalog = InstrumentCatalog::default();
        assert!(matches!(
            catalog.resolve("Tulip Bulbs"),
            Err(SimulationError::UnrecognizedInstrument(id)) if id == "Tulip Bulbs"
        ));
    }

    #[test]
    fn test_symbols_are_unique() {
        let catalog = InstrumentCatalog::default();
        let mut symbols: Vec<_> = catalog.iter().map(|i| i.symbol).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), catalog.len());
    }
}
