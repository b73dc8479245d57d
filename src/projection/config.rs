//! Simulation inputs as edited from the investment page

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ProjectionError;
use crate::instruments::{InstrumentTable, Ticker};

/// Custom growth/dividend pair replacing an instrument's baseline profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOverride {
    /// Annual growth rate in percent
    pub cagr: f64,
    /// Annual dividend yield in percent
    pub dividend: f64,
}

/// Which half of a rate override is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateField {
    Cagr,
    Dividend,
}

/// Input state for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Selected instruments, in display order
    pub selected: Vec<Ticker>,

    /// Years to simulate (the UI offers 1-30)
    pub horizon_years: u32,

    /// Starting monthly deposit
    pub monthly_contribution: f64,

    /// Added to the monthly deposit at each year boundary
    pub annual_contribution_increase: f64,

    /// Upper bound on the monthly deposit after escalation
    pub contribution_cap: Option<f64>,

    /// Whether `rate_overrides` are applied
    pub custom_rates_enabled: bool,

    pub rate_overrides: HashMap<Ticker, RateOverride>,

    /// Dividend reinvestment per instrument; absent means reinvested
    pub drip: HashMap<Ticker, bool>,
}

impl Default for SimulationConfig {
    /// Same state as the page's "reset settings" button
    fn default() -> Self {
        Self {
            selected: vec![Ticker::from("QQQ"), Ticker::from("VOO")],
            horizon_years: 10,
            monthly_contribution: 1_000_000.0,
            annual_contribution_increase: 100_000.0,
            contribution_cap: None,
            custom_rates_enabled: false,
            rate_overrides: HashMap::new(),
            drip: HashMap::new(),
        }
    }
}

impl SimulationConfig {
    /// Whether dividends for `ticker` are reinvested
    pub fn drip_enabled(&self, ticker: &Ticker) -> bool {
        self.drip.get(ticker).copied().unwrap_or(true)
    }

    /// Number of simulated months, widened so any horizon fits
    pub fn total_months(&self) -> u64 {
        u64::from(self.horizon_years) * 12
    }

    /// Monthly deposit for the year after one paying `monthly`
    pub fn escalate(&self, monthly: f64) -> f64 {
        let next = monthly + self.annual_contribution_increase;
        match self.contribution_cap {
            Some(cap) => next.min(cap),
            None => next,
        }
    }

    /// Add or remove an instrument from the selection
    pub fn toggle_instrument(&mut self, ticker: Ticker) {
        if let Some(pos) = self.selected.iter().position(|t| *t == ticker) {
            self.selected.remove(pos);
        } else {
            self.selected.push(ticker);
        }
    }

    pub fn toggle_drip(&mut self, ticker: Ticker) {
        let current = self.drip_enabled(&ticker);
        self.drip.insert(ticker, !current);
    }

    /// Edit one half of an override, taking the other half from the existing
    /// override or else the baseline profile
    pub fn set_override_field(
        &mut self,
        ticker: &Ticker,
        field: RateField,
        value: f64,
        table: &InstrumentTable,
    ) -> Result<(), ProjectionError> {
        let base = match self.rate_overrides.get(ticker) {
            Some(existing) => *existing,
            None => match table.get(ticker) {
                Some(profile) => RateOverride {
                    cagr: profile.cagr,
                    dividend: profile.dividend,
                },
                None => {
                    return Err(ProjectionError::MissingRates {
                        ticker: ticker.clone(),
                    })
                }
            },
        };

        let updated = match field {
            RateField::Cagr => RateOverride { cagr: value, ..base },
            RateField::Dividend => RateOverride {
                dividend: value,
                ..base
            },
        };
        self.rate_overrides.insert(ticker.clone(), updated);
        Ok(())
    }

    /// Selected tickers with later duplicates removed
    pub fn unique_selection(&self) -> Vec<&Ticker> {
        let mut seen: Vec<&Ticker> = Vec::with_capacity(self.selected.len());
        for ticker in &self.selected {
            if seen.contains(&ticker) {
                log::warn!("Instrument {} selected twice; keeping first", ticker);
                continue;
            }
            seen.push(ticker);
        }
        seen
    }
}
