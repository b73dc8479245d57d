//! Load instrument profiles from instruments.csv

use super::{InstrumentProfile, Ticker};
use crate::error::LoadError;
use csv::Reader;
use std::path::Path;

/// Default path to the instrument reference table
pub const DEFAULT_INSTRUMENTS_PATH: &str = "data/instruments.csv";

/// Raw CSV row matching instruments.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Cagr")]
    cagr: f64,
    #[serde(rename = "Dividend")]
    dividend: f64,
    #[serde(rename = "Color", default)]
    color: String,
    #[serde(rename = "Description", default)]
    description: String,
}

impl CsvRow {
    fn to_profile(self, row: usize) -> Result<InstrumentProfile, LoadError> {
        let ticker = Ticker::new(self.ticker);
        if ticker.as_str().is_empty() {
            return Err(LoadError::InvalidRow {
                row,
                reason: "blank ticker".to_string(),
            });
        }
        if !self.cagr.is_finite() || !self.dividend.is_finite() {
            return Err(LoadError::InvalidRow {
                row,
                reason: format!("non-finite rate for {}", ticker),
            });
        }

        Ok(InstrumentProfile {
            ticker,
            category: self.category,
            cagr: self.cagr,
            dividend: self.dividend,
            color: self.color,
            description: self.description,
        })
    }
}

/// Load all instrument profiles from a CSV file
pub fn load_instruments<P: AsRef<Path>>(path: P) -> Result<Vec<InstrumentProfile>, LoadError> {
    let path = path.as_ref();
    log::debug!("Loading instruments from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_instruments_from_reader(file)
}

/// Load instrument profiles from any reader (e.g., string buffer, API response body)
pub fn load_instruments_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<InstrumentProfile>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut profiles: Vec<InstrumentProfile> = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Header is line 1
        let profile = row.to_profile(i + 2)?;
        if profiles.iter().any(|p| p.ticker == profile.ticker) {
            return Err(LoadError::InvalidRow {
                row: i + 2,
                reason: format!("duplicate ticker {}", profile.ticker),
            });
        }
        profiles.push(profile);
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Ticker,Category,Cagr,Dividend,Color,Description
QQQ,Growth (Tech),17.5,0.6,#3b82f6,Nasdaq-100
SCHD,Dividend growth,11.5,3.5,#f59e0b,
";

    #[test]
    fn test_load_from_reader() {
        let profiles = load_instruments_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].ticker, Ticker::from("QQQ"));
        assert_eq!(profiles[0].cagr, 17.5);
        assert_eq!(profiles[1].description, "");
    }

    #[test]
    fn test_duplicate_ticker_rejected() {
        let csv = "Ticker,Category,Cagr,Dividend,Color,Description\nVOO,a,1,1,,\nVOO,b,2,2,,\n";
        let err = load_instruments_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { row: 3, .. }));
    }

    #[test]
    fn test_blank_ticker_rejected() {
        let csv = "Ticker,Category,Cagr,Dividend,Color,Description\n ,a,1,1,,\n";
        let err = load_instruments_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRow { row: 2, .. }));
    }

    #[test]
    fn test_unparseable_rate_is_csv_error() {
        let csv = "Ticker,Category,Cagr,Dividend,Color,Description\nVOO,a,abc,1,,\n";
        let err = load_instruments_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_bundled_table_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_INSTRUMENTS_PATH);
        let profiles = load_instruments(&path).expect("Failed to load bundled instruments");
        assert_eq!(profiles.len(), 5);
        assert_eq!(profiles[3].ticker, Ticker::from("JEPI"));
        assert_eq!(profiles[3].dividend, 7.5);
    }
}
