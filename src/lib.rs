//! Moneybook - computational core of a personal-finance app
//!
//! This library provides:
//! - Amount-field expressions with live thousands grouping and safe evaluation
//! - ETF investment projections (DCA, escalating deposits, dividend reinvestment)
//! - Multi-instrument comparison, ranking and chart series
//! - Budget-vs-actual aggregation over ledger records
//! - Stock portfolio totals over synced holdings

pub mod error;
pub mod expr;
pub mod format;
pub mod instruments;
pub mod ledger;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ExprError, LoadError, ProjectionError};
pub use expr::{evaluate_expr, format_expr, try_evaluate_expr, AmountInput};
pub use instruments::{InstrumentProfile, InstrumentTable, Ticker};
pub use projection::{
    chart_series, run_projection, summarize, InstrumentSummary, ProjectionEngine,
    ProjectionOutput, SimulationConfig,
};
pub use scenario::ScenarioRunner;
