//! Scenario runner for repeated projections
//!
//! Loads the instrument table once, then runs any number of simulation
//! configurations against it without re-reading the CSV file.

use rayon::prelude::*;

use crate::error::{LoadError, ProjectionError};
use crate::instruments::InstrumentTable;
use crate::projection::{
    summarize, InstrumentSummary, ProjectionEngine, ProjectionOutput, SimulationConfig,
};

/// Output and ranked summaries of one configuration
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub output: ProjectionOutput,
    pub summaries: Vec<InstrumentSummary>,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for years in [10, 20, 30] {
///     let config = SimulationConfig { horizon_years: years, ..Default::default() };
///     let result = runner.run(&config)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    instruments: InstrumentTable,
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the built-in ETF table
    pub fn new() -> Self {
        Self::with_instruments(InstrumentTable::default_etfs())
    }

    /// Create runner by loading instruments from the default CSV file
    pub fn from_csv() -> Result<Self, LoadError> {
        Ok(Self::with_instruments(InstrumentTable::from_csv()?))
    }

    /// Create runner from a specific instruments file
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, LoadError> {
        Ok(Self::with_instruments(InstrumentTable::from_csv_path(path)?))
    }

    pub fn with_instruments(instruments: InstrumentTable) -> Self {
        Self {
            instruments,
            engine: ProjectionEngine::new(),
        }
    }

    /// Record monthly rows in every run
    pub fn detailed(mut self) -> Self {
        self.engine = ProjectionEngine::detailed();
        self
    }

    /// Run a single configuration
    pub fn run(&self, config: &SimulationConfig) -> Result<ScenarioResult, ProjectionError> {
        let output = self.engine.run(config, &self.instruments)?;
        let summaries = summarize(&output, config);
        Ok(ScenarioResult { output, summaries })
    }

    /// Run several configurations in parallel, results in input order
    pub fn run_scenarios(
        &self,
        configs: &[SimulationConfig],
    ) -> Vec<Result<ScenarioResult, ProjectionError>> {
        configs.par_iter().map(|config| self.run(config)).collect()
    }

    pub fn instruments(&self) -> &InstrumentTable {
        &self.instruments
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
