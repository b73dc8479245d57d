//! Moneybook CLI
//!
//! Evaluate amount expressions and run ETF projections from the command line

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use moneybook::format::{compact_axis_label, format_currency, format_percent};
use moneybook::instruments::DEFAULT_INSTRUMENTS_PATH;
use moneybook::projection::{
    best_performer, chart_series, contributions, RateOverride, SimulationConfig,
};
use moneybook::{format_expr, try_evaluate_expr, InstrumentTable, ScenarioRunner, Ticker};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "moneybook")]
#[command(about = "Amount expressions and ETF investment projections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format and evaluate an amount expression such as "2,000+3,000"
    Eval {
        #[arg(value_name = "EXPR")]
        expr: String,
    },
    /// Run an investment projection and write the chart series as CSV
    Simulate {
        /// Instrument to include (repeatable, defaults to QQQ and VOO)
        #[arg(short, long = "ticker")]
        tickers: Vec<String>,

        /// Years to simulate
        #[arg(short, long)]
        years: Option<u32>,

        /// Starting monthly deposit (expressions allowed)
        #[arg(short, long)]
        monthly: Option<String>,

        /// Monthly deposit increase per year (expressions allowed)
        #[arg(short, long)]
        increase: Option<String>,

        /// Cap on the monthly deposit (expressions allowed)
        #[arg(long)]
        cap: Option<String>,

        /// Custom rates as TICKER=CAGR:DIVIDEND, in percent (repeatable)
        #[arg(long = "rate", value_name = "TICKER=CAGR:DIVIDEND")]
        rates: Vec<String>,

        /// Pay out instead of reinvesting dividends for TICKER (repeatable)
        #[arg(long = "no-drip", value_name = "TICKER")]
        no_drip: Vec<String>,

        /// Instrument table CSV
        #[arg(long)]
        profiles: Option<PathBuf>,

        /// Chart series output file
        #[arg(short, long, default_value = "projection_series.csv")]
        output: PathBuf,

        /// Also write every simulated month to this file
        #[arg(long)]
        monthly_output: Option<PathBuf>,

        /// Print the ranked summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the instrument table
    Instruments {
        /// Instrument table CSV
        #[arg(long)]
        profiles: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { expr } => {
            println!("{}", format_expr(&expr));
            match try_evaluate_expr(&expr) {
                Ok(value) => println!("= {}", moneybook::format::format_number(value)),
                Err(e) => println!("invalid ({e})"),
            }
        }
        Commands::Simulate {
            tickers,
            years,
            monthly,
            increase,
            cap,
            rates,
            no_drip,
            profiles,
            output,
            monthly_output,
            json,
        } => {
            let table = load_table(profiles.as_deref())?;

            let mut config = SimulationConfig::default();
            if !tickers.is_empty() {
                config.selected = tickers.into_iter().map(Ticker::from).collect();
            }
            if let Some(years) = years {
                config.horizon_years = years;
            }
            if let Some(monthly) = monthly {
                config.monthly_contribution = parse_amount("monthly", &monthly)?;
            }
            if let Some(increase) = increase {
                config.annual_contribution_increase = parse_amount("increase", &increase)?;
            }
            if let Some(cap) = cap {
                config.contribution_cap = Some(parse_amount("cap", &cap)?);
            }
            for rate in &rates {
                let (ticker, rate) = parse_rate(rate)?;
                config.rate_overrides.insert(ticker, rate);
            }
            config.custom_rates_enabled = !config.rate_overrides.is_empty();
            for ticker in no_drip {
                config.drip.insert(Ticker::from(ticker), false);
            }

            let mut runner = ScenarioRunner::with_instruments(table);
            if monthly_output.is_some() {
                runner = runner.detailed();
            }
            let result = runner.run(&config)?;

            write_chart_series(&output, &result.output)?;
            println!("Chart series written to: {}", output.display());
            if let Some(path) = &monthly_output {
                write_monthly_rows(path, &result.output)?;
                println!("Monthly rows written to: {}", path.display());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result.summaries)?);
                return Ok(());
            }

            println!(
                "\nProjection over {} years, {} per month (+{} per year{})",
                config.horizon_years,
                format_currency(config.monthly_contribution),
                format_currency(config.annual_contribution_increase),
                config
                    .contribution_cap
                    .map(|c| format!(", capped at {}", format_currency(c)))
                    .unwrap_or_default()
            );
            println!(
                "{:>6} {:>20} {:>20} {:>18} {:>20} {:>9}",
                "Ticker", "Final asset", "Principal", "Dividends", "Gain", "Gain %"
            );
            println!("{}", "-".repeat(98));
            for s in &result.summaries {
                println!(
                    "{:>6} {:>20} {:>20} {:>18} {:>20} {:>9}",
                    s.ticker,
                    format_currency(s.final_asset),
                    format_currency(s.total_contribution),
                    format_currency(s.total_dividend),
                    format_currency(s.gain),
                    format_percent(s.gain_percent),
                );
            }

            if let Some(best) = best_performer(&result.summaries) {
                println!(
                    "\nBest: {} at {} ({} on principal)",
                    best.ticker,
                    compact_axis_label(best.final_asset),
                    format_percent(best.gain_percent)
                );
            }
            if let Some(last) = contributions(&config).last() {
                println!("Final-year monthly deposit: {}", format_currency(last));
            }
        }
        Commands::Instruments { profiles } => {
            let table = load_table(profiles.as_deref())?;
            println!("{:>6} {:>8} {:>9}  {}", "Ticker", "CAGR %", "Div %", "Category");
            for p in table.iter() {
                println!("{:>6} {:>8.2} {:>9.2}  {}", p.ticker, p.cagr, p.dividend, p.category);
            }
        }
    }

    Ok(())
}

/// Explicit file, else the bundled CSV if present, else the built-in table
fn load_table(profiles: Option<&Path>) -> Result<InstrumentTable> {
    match profiles {
        Some(path) => InstrumentTable::from_csv_path(path)
            .with_context(|| format!("loading instruments from {}", path.display())),
        None if Path::new(DEFAULT_INSTRUMENTS_PATH).exists() => {
            InstrumentTable::from_csv().context("loading bundled instruments")
        }
        None => {
            log::info!("{} not found, using built-in instruments", DEFAULT_INSTRUMENTS_PATH);
            Ok(InstrumentTable::default_etfs())
        }
    }
}

fn parse_amount(flag: &str, raw: &str) -> Result<f64> {
    try_evaluate_expr(raw).map_err(|e| anyhow!("--{flag} {raw:?}: {e}"))
}

/// Parse `TICKER=CAGR:DIVIDEND`
fn parse_rate(raw: &str) -> Result<(Ticker, RateOverride)> {
    let (ticker, rates) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("--rate {raw:?}: expected TICKER=CAGR:DIVIDEND"))?;
    let (cagr, dividend) = rates
        .split_once(':')
        .ok_or_else(|| anyhow!("--rate {raw:?}: expected CAGR:DIVIDEND after '='"))?;

    let ticker = Ticker::from(ticker);
    if ticker.as_str().is_empty() {
        bail!("--rate {raw:?}: missing ticker");
    }
    let cagr = parse_amount("rate", cagr)?;
    let dividend = parse_amount("rate", dividend)?;
    Ok((ticker, RateOverride { cagr, dividend }))
}

fn write_chart_series(path: &Path, output: &moneybook::ProjectionOutput) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Year".to_string()];
    header.extend(output.instruments.iter().map(|p| p.ticker.to_string()));
    writer.write_record(&header)?;

    for point in chart_series(output) {
        let mut record = vec![point.year.to_string()];
        record.extend(point.values.iter().map(|(_, v)| format!("{v:.2}")));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_monthly_rows(path: &Path, output: &moneybook::ProjectionOutput) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "Ticker", "Month", "Year", "MonthInYear", "BOP", "Growth", "Dividend", "Reinvested",
        "Contribution", "EOP",
    ])?;

    for projection in &output.instruments {
        for row in &projection.months {
            writer.write_record(&[
                projection.ticker.to_string(),
                row.month.to_string(),
                row.year.to_string(),
                row.month_in_year.to_string(),
                format!("{:.2}", row.bop_balance),
                format!("{:.2}", row.growth),
                format!("{:.2}", row.dividend),
                (row.dividend_reinvested as u8).to_string(),
                format!("{:.2}", row.contribution),
                format!("{:.2}", row.eop_balance),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
