//! Sweep horizons 1-30 for every built-in ETF and write final values to CSV
//!
//! Usage: cargo run --bin horizon_sweep

use anyhow::{Context, Result};
use moneybook::projection::SimulationConfig;
use moneybook::{ScenarioRunner, Ticker};
use std::time::Instant;

const MAX_HORIZON: u32 = 30;

fn main() -> Result<()> {
    env_logger::init();

    let start = Instant::now();
    let runner = ScenarioRunner::new();
    let tickers: Vec<Ticker> = runner.instruments().tickers().cloned().collect();

    let configs: Vec<SimulationConfig> = (1..=MAX_HORIZON)
        .map(|years| SimulationConfig {
            selected: tickers.clone(),
            horizon_years: years,
            ..SimulationConfig::default()
        })
        .collect();

    println!("Running {} horizons for {} instruments...", configs.len(), tickers.len());
    let results = runner.run_scenarios(&configs);

    let output_path = "horizon_sweep.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header = vec!["Years".to_string(), "Principal".to_string()];
    header.extend(tickers.iter().map(|t| t.to_string()));
    header.push("Best".to_string());
    writer.write_record(&header)?;

    for (config, result) in configs.iter().zip(results) {
        let result = result?;
        let principal = result
            .summaries
            .first()
            .map(|s| s.total_contribution)
            .unwrap_or(0.0);

        let mut record = vec![config.horizon_years.to_string(), format!("{principal:.0}")];
        for ticker in &tickers {
            let value = result
                .output
                .get(ticker)
                .map(|p| p.final_asset())
                .unwrap_or(0.0);
            record.push(format!("{value:.0}"));
        }
        record.push(
            result
                .summaries
                .first()
                .map(|s| s.ticker.to_string())
                .unwrap_or_default(),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!("Output written to {output_path}");
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
