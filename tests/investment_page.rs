//! End-to-end flows of the investment simulator and amount fields

use approx::assert_relative_eq;
use moneybook::projection::{
    chart_series, contribution_schedule, summarize, total_contribution, RateField,
    SimulationConfig,
};
use moneybook::{
    evaluate_expr, format_expr, run_projection, AmountInput, InstrumentTable, ScenarioRunner,
    Ticker,
};

fn all_etfs(years: u32) -> SimulationConfig {
    SimulationConfig {
        selected: ["QQQ", "VOO", "SCHD", "JEPI", "JEPQ"]
            .into_iter()
            .map(Ticker::from)
            .collect(),
        horizon_years: years,
        ..SimulationConfig::default()
    }
}

#[test]
fn default_page_ranks_qqq_over_voo() {
    let runner = ScenarioRunner::new();
    let result = runner.run(&SimulationConfig::default()).unwrap();

    assert_eq!(result.summaries.len(), 2);
    assert_eq!(result.summaries[0].ticker, Ticker::from("QQQ"));
    assert_eq!(result.summaries[1].ticker, Ticker::from("VOO"));

    // 10 years of 1,000,000/month rising 100,000/year
    let principal = 12.0 * (1_000_000.0 * 10.0 + 100_000.0 * 45.0);
    assert_eq!(result.summaries[0].total_contribution, principal);
    assert!(result.summaries.iter().all(|s| s.gain > 0.0));
}

#[test]
fn chart_has_origin_and_one_point_per_year() {
    let config = all_etfs(30);
    let output = run_projection(&config, &InstrumentTable::default_etfs()).unwrap();
    let series = chart_series(&output);

    assert_eq!(series.len(), 31);
    assert!(series[0].values.iter().all(|(_, v)| *v == 0.0));
    for (year, point) in series.iter().enumerate().skip(1) {
        assert_eq!(point.year as usize, year);
        assert_eq!(point.values.len(), 5);
    }
}

#[test]
fn cap_limits_escalation_over_long_horizon() {
    let config = SimulationConfig {
        horizon_years: 30,
        contribution_cap: Some(2_000_000.0),
        ..SimulationConfig::default()
    };
    assert!(contribution_schedule(&config)
        .iter()
        .all(|&monthly| monthly * 12.0 <= 24_000_000.0));

    let uncapped = SimulationConfig {
        contribution_cap: None,
        ..config.clone()
    };
    assert!(total_contribution(&config) < total_contribution(&uncapped));
}

#[test]
fn custom_rates_change_ranking() {
    let table = InstrumentTable::default_etfs();
    let mut config = SimulationConfig {
        selected: vec![Ticker::from("QQQ"), Ticker::from("JEPI")],
        ..SimulationConfig::default()
    };
    config
        .set_override_field(&Ticker::from("JEPI"), RateField::Cagr, 25.0, &table)
        .unwrap();

    let baseline = summarize(&run_projection(&config, &table).unwrap(), &config);
    assert_eq!(baseline[0].ticker, Ticker::from("QQQ"));

    config.custom_rates_enabled = true;
    let custom = summarize(&run_projection(&config, &table).unwrap(), &config);
    assert_eq!(custom[0].ticker, Ticker::from("JEPI"));
    // Principal does not depend on rates
    assert_relative_eq!(custom[0].total_contribution, baseline[0].total_contribution);
}

#[test]
fn amount_field_round_trip() {
    let mut field = AmountInput::new();
    for keystrokes in ["1", "12", "120", "1200", "12000", "12,000*", "12,000*2"] {
        field.update(keystrokes);
    }
    assert_eq!(field.display(), "12,000*2");
    assert_eq!(field.committed(), Some(24_000.0));

    assert_eq!(format_expr("2000+3000"), "2,000+3,000");
    assert_eq!(evaluate_expr(&format_expr("2000+3000")), Some(5_000.0));
}
