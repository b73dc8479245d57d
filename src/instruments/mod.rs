//! Instrument reference data: tickers and their baseline growth/dividend profiles

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::LoadError;

pub use loader::{load_instruments, load_instruments_from_reader, DEFAULT_INSTRUMENTS_PATH};

/// Ticker symbol identifying an instrument
///
/// Kept as an opaque string: the instrument set is reference data, not a closed type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

impl From<String> for Ticker {
    fn from(symbol: String) -> Self {
        Self::new(symbol)
    }
}

/// Static profile of a selectable instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentProfile {
    pub ticker: Ticker,

    /// Display category, e.g. "Market index (S&P500)"
    pub category: String,

    /// Baseline annual growth rate in percent
    pub cagr: f64,

    /// Baseline annual dividend yield in percent
    pub dividend: f64,

    /// Chart color, opaque to the engine
    pub color: String,

    #[serde(default)]
    pub description: String,
}

impl InstrumentProfile {
    pub fn new(
        ticker: impl Into<Ticker>,
        category: &str,
        cagr: f64,
        dividend: f64,
        color: &str,
        description: &str,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            category: category.to_string(),
            cagr,
            dividend,
            color: color.to_string(),
            description: description.to_string(),
        }
    }
}

/// Immutable lookup table of instrument profiles, in display order
#[derive(Debug, Clone, Default)]
pub struct InstrumentTable {
    profiles: Vec<InstrumentProfile>,
    index: HashMap<Ticker, usize>,
}

impl InstrumentTable {
    /// Build a table from profiles. Later duplicates of a ticker are dropped.
    pub fn from_profiles(profiles: impl IntoIterator<Item = InstrumentProfile>) -> Self {
        let mut table = Self::default();
        for profile in profiles {
            if table.index.contains_key(&profile.ticker) {
                log::warn!("Duplicate instrument {} ignored", profile.ticker);
                continue;
            }
            table.index.insert(profile.ticker.clone(), table.profiles.len());
            table.profiles.push(profile);
        }
        table
    }

    /// Built-in table of the five ETFs offered by the simulator
    pub fn default_etfs() -> Self {
        Self::from_profiles([
            InstrumentProfile::new(
                "QQQ",
                "Growth (Tech)",
                17.5,
                0.6,
                "#3b82f6",
                "Tracks the Nasdaq-100. High growth, low dividend, tech heavy.",
            ),
            InstrumentProfile::new(
                "VOO",
                "Market index (S&P500)",
                12.5,
                1.5,
                "#10b981",
                "Tracks the S&P500. Steady growth at the market average.",
            ),
            InstrumentProfile::new(
                "SCHD",
                "Dividend growth",
                11.5,
                3.5,
                "#f59e0b",
                "Dividend growth stocks. Balances growth and income.",
            ),
            InstrumentProfile::new(
                "JEPI",
                "High dividend (Covered Call)",
                6.0,
                7.5,
                "#ef4444",
                "Covered call strategy. Low volatility, high monthly income.",
            ),
            InstrumentProfile::new(
                "JEPQ",
                "High dividend (Tech)",
                9.0,
                9.5,
                "#8b5cf6",
                "Nasdaq-based covered call. Tech exposure plus high income.",
            ),
        ])
    }

    /// Load the table from the default CSV location
    pub fn from_csv() -> Result<Self, LoadError> {
        Self::from_csv_path(Path::new(DEFAULT_INSTRUMENTS_PATH))
    }

    /// Load the table from a specific CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self, LoadError> {
        Ok(Self::from_profiles(load_instruments(path)?))
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&InstrumentProfile> {
        self.index.get(ticker).map(|&i| &self.profiles[i])
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.index.contains_key(ticker)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstrumentProfile> {
        self.profiles.iter()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.profiles.iter().map(|p| &p.ticker)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
