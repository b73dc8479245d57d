//! Principal bookkeeping: cash paid in per year, independent of performance

use super::config::SimulationConfig;

/// Monthly deposit in force for each simulated year, computed lazily
pub fn contributions(config: &SimulationConfig) -> impl Iterator<Item = f64> + '_ {
    (0..config.horizon_years).scan(config.monthly_contribution, |monthly, _| {
        let current = *monthly;
        *monthly = config.escalate(current);
        Some(current)
    })
}

/// Monthly deposit in force for each simulated year
pub fn contribution_schedule(config: &SimulationConfig) -> Vec<f64> {
    contributions(config).collect()
}

/// Total principal contributed over the horizon
pub fn total_contribution(config: &SimulationConfig) -> f64 {
    contributions(config).map(|monthly| monthly * 12.0).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_contribution() {
        let config = SimulationConfig {
            horizon_years: 7,
            monthly_contribution: 250_000.0,
            annual_contribution_increase: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(total_contribution(&config), 250_000.0 * 12.0 * 7.0);
    }

    #[test]
    fn test_escalating_schedule() {
        let config = SimulationConfig {
            horizon_years: 3,
            monthly_contribution: 1_000.0,
            annual_contribution_increase: 100.0,
            ..SimulationConfig::default()
        };
        assert_eq!(contribution_schedule(&config), vec![1_000.0, 1_100.0, 1_200.0]);
        assert_eq!(contributions(&config).last(), Some(1_200.0));
        assert_eq!(total_contribution(&config), 12.0 * 3_300.0);
    }

    #[test]
    fn test_cap_bounds_every_year() {
        let config = SimulationConfig {
            horizon_years: 30,
            monthly_contribution: 1_000_000.0,
            annual_contribution_increase: 100_000.0,
            contribution_cap: Some(2_000_000.0),
            ..SimulationConfig::default()
        };
        let schedule = contribution_schedule(&config);
        assert!(schedule.iter().all(|&m| m * 12.0 <= 2_000_000.0 * 12.0));
        assert_eq!(schedule[10], 2_000_000.0);
        assert_eq!(*schedule.last().unwrap(), 2_000_000.0);
    }

    #[test]
    fn test_zero_horizon() {
        let config = SimulationConfig {
            horizon_years: 0,
            ..SimulationConfig::default()
        };
        assert!(contribution_schedule(&config).is_empty());
        assert_eq!(total_contribution(&config), 0.0);
    }
}
