//! Core projection engine: monthly compounding with DCA and dividend reinvestment

use super::config::SimulationConfig;
use super::results::{InstrumentProjection, MonthRow, ProjectionOutput};
use super::state::AccountState;
use crate::error::ProjectionError;
use crate::instruments::{InstrumentTable, Ticker};

/// Annual rates applied to one instrument for a whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    /// Annual growth rate in percent, compounded monthly
    pub cagr: f64,
    /// Annual dividend yield in percent, paid monthly
    pub dividend: f64,
}

impl Rates {
    pub fn monthly_growth(&self) -> f64 {
        self.cagr / 100.0 / 12.0
    }

    pub fn monthly_dividend(&self) -> f64 {
        self.dividend / 100.0 / 12.0
    }
}

/// A selected instrument with its rates and DRIP flag resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstrument {
    pub ticker: Ticker,
    pub rates: Rates,
    pub drip: bool,
}

/// Resolve rates for every selected instrument before anything is simulated.
///
/// An active override wins over the baseline profile. A ticker with neither
/// fails the whole run.
pub fn resolve_rates(
    config: &SimulationConfig,
    table: &InstrumentTable,
) -> Result<Vec<ResolvedInstrument>, ProjectionError> {
    config
        .unique_selection()
        .into_iter()
        .map(|ticker| {
            let override_rates = config
                .rate_overrides
                .get(ticker)
                .filter(|_| config.custom_rates_enabled)
                .map(|o| Rates {
                    cagr: o.cagr,
                    dividend: o.dividend,
                });

            let rates = match override_rates {
                Some(rates) => rates,
                None => match table.get(ticker) {
                    Some(profile) => Rates {
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

            Ok(ResolvedInstrument {
                ticker: ticker.clone(),
                rates,
                drip: config.drip_enabled(ticker),
            })
        })
        .collect()
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    /// Record a `MonthRow` for every simulated month
    detailed_output: bool,
}

impl ProjectionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that also records monthly rows
    pub fn detailed() -> Self {
        Self {
            detailed_output: true,
        }
    }

    /// Run the projection for every selected instrument
    pub fn run(
        &self,
        config: &SimulationConfig,
        table: &InstrumentTable,
    ) -> Result<ProjectionOutput, ProjectionError> {
        let resolved = resolve_rates(config, table)?;
        log::debug!(
            "Projecting {} instruments over {} years",
            resolved.len(),
            config.horizon_years
        );

        let instruments = resolved
            .iter()
            .map(|instrument| self.project_instrument(instrument, config))
            .collect();

        Ok(ProjectionOutput { instruments })
    }

    /// Simulate one instrument month by month.
    ///
    /// Within a month: growth compounds, the dividend accrues on the grown
    /// balance and is reinvested if DRIP is on, then the deposit lands.
    pub fn project_instrument(
        &self,
        instrument: &ResolvedInstrument,
        config: &SimulationConfig,
    ) -> InstrumentProjection {
        let mut result = InstrumentProjection::new(instrument.ticker.clone());
        let mut state = AccountState::new(config.monthly_contribution);
        let growth_rate = instrument.rates.monthly_growth();
        let dividend_rate = instrument.rates.monthly_dividend();

        for _ in 0..config.total_months() {
            state.advance_month();
            let bop_balance = state.balance;

            state.balance *= 1.0 + growth_rate;
            let growth = state.balance - bop_balance;

            let dividend = state.balance * dividend_rate;
            state.total_dividend += dividend;
            if instrument.drip {
                state.balance += dividend;
            }

            let contribution = state.monthly_contribution;
            state.balance += contribution;

            if self.detailed_output {
                result.months.push(MonthRow {
                    month: state.month,
                    year: state.year,
                    month_in_year: state.month_in_year,
                    bop_balance,
                    growth,
                    dividend,
                    dividend_reinvested: instrument.drip,
                    contribution,
                    eop_balance: state.balance,
                });
            }

            if state.is_year_end() {
                result.yearly_series.push(state.balance);
                state.monthly_contribution = config.escalate(state.monthly_contribution);
            }
        }

        result.total_dividend = state.total_dividend;
        log::debug!(
            "{}: final {:.2}, dividends {:.2}",
            instrument.ticker,
            result.final_asset(),
            result.total_dividend
        );
        result
    }
}

/// Run a projection with the default engine
pub fn run_projection(
    config: &SimulationConfig,
    table: &InstrumentTable,
) -> Result<ProjectionOutput, ProjectionError> {
    ProjectionEngine::new().run(config, table)
}
