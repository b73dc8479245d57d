//! Projection output structures, summaries and chart series

use serde::{Deserialize, Serialize};

use super::config::SimulationConfig;
use super::schedule::total_contribution;
use crate::instruments::Ticker;

/// A single simulated month, recorded when detailed output is requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    // Timing
    pub month: u64,
    pub year: u32,
    pub month_in_year: u32,

    pub bop_balance: f64,
    pub growth: f64,
    pub dividend: f64,
    pub dividend_reinvested: bool,
    pub contribution: f64,
    pub eop_balance: f64,
}

/// Simulation output for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentProjection {
    pub ticker: Ticker,

    /// Year-end account values, one per simulated year
    pub yearly_series: Vec<f64>,

    /// Dividends paid over the horizon, reinvested or not
    pub total_dividend: f64,

    /// Monthly rows, empty unless detailed output was requested
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub months: Vec<MonthRow>,
}

impl InstrumentProjection {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            yearly_series: Vec::new(),
            total_dividend: 0.0,
            months: Vec::new(),
        }
    }

    /// Value at the end of the horizon, 0 for an empty horizon
    pub fn final_asset(&self) -> f64 {
        self.yearly_series.last().copied().unwrap_or(0.0)
    }
}

/// Output of a run over every selected instrument, in selection order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOutput {
    pub instruments: Vec<InstrumentProjection>,
}

impl ProjectionOutput {
    pub fn get(&self, ticker: &Ticker) -> Option<&InstrumentProjection> {
        self.instruments.iter().find(|p| &p.ticker == ticker)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Summary statistics for one instrument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSummary {
    pub ticker: Ticker,
    pub final_asset: f64,
    pub total_contribution: f64,
    pub total_dividend: f64,
    pub gain: f64,
    pub gain_percent: f64,
}

impl InstrumentSummary {
    pub fn from_projection(projection: &InstrumentProjection, total_contribution: f64) -> Self {
        let final_asset = projection.final_asset();
        let gain = final_asset - total_contribution;
        let gain_percent = if total_contribution > 0.0 {
            gain / total_contribution * 100.0
        } else {
            0.0
        };

        Self {
            ticker: projection.ticker.clone(),
            final_asset,
            total_contribution,
            total_dividend: projection.total_dividend,
            gain,
            gain_percent,
        }
    }
}

/// Summarize every instrument, best final asset first.
///
/// The sort is stable: instruments with equal final assets keep selection order.
/// A NaN final asset always ranks last.
pub fn summarize(output: &ProjectionOutput, config: &SimulationConfig) -> Vec<InstrumentSummary> {
    let principal = total_contribution(config);
    let mut summaries: Vec<InstrumentSummary> = output
        .instruments
        .iter()
        .map(|p| InstrumentSummary::from_projection(p, principal))
        .collect();

    summaries.sort_by(|a, b| {
        a.final_asset
            .is_nan()
            .cmp(&b.final_asset.is_nan())
            .then_with(|| b.final_asset.total_cmp(&a.final_asset))
    });
    summaries
}

/// Top entry of a ranked summary list
pub fn best_performer(summaries: &[InstrumentSummary]) -> Option<&InstrumentSummary> {
    summaries.first()
}

/// One x-axis point of the comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub year: u32,
    /// Account value per instrument, in selection order
    pub values: Vec<(Ticker, f64)>,
}

impl ChartPoint {
    pub fn value(&self, ticker: &Ticker) -> Option<f64> {
        self.values
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, v)| *v)
    }
}

/// Chart series with a year-0 origin point prepended
pub fn chart_series(output: &ProjectionOutput) -> Vec<ChartPoint> {
    let horizon = output
        .instruments
        .iter()
        .map(|p| p.yearly_series.len())
        .max()
        .unwrap_or(0);

    let mut points = Vec::with_capacity(horizon + 1);
    points.push(ChartPoint {
        year: 0,
        values: output
            .instruments
            .iter()
            .map(|p| (p.ticker.clone(), 0.0))
            .collect(),
    });

    for year in 1..=horizon {
        points.push(ChartPoint {
            year: year as u32,
            values: output
                .instruments
                .iter()
                .filter_map(|p| {
                    p.yearly_series
                        .get(year - 1)
                        .map(|&v| (p.ticker.clone(), v))
                })
                .collect(),
        });
    }

    points
}
