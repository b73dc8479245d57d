//! Investment projection: dollar-cost averaging with escalating deposits,
//! monthly compounding and optional dividend reinvestment

mod config;
mod engine;
mod results;
mod schedule;
mod state;

pub use config::{RateField, RateOverride, SimulationConfig};
pub use engine::{resolve_rates, run_projection, ProjectionEngine, Rates, ResolvedInstrument};
pub use results::{
    best_performer, chart_series, summarize, ChartPoint, InstrumentProjection, InstrumentSummary,
    MonthRow, ProjectionOutput,
};
pub use schedule::{contribution_schedule, contributions, total_contribution};
pub use state::AccountState;
