//! Account state tracked through a single instrument's simulation

/// State of one simulated account at a point in time.
///
/// Created fresh for every instrument run and dropped when the run ends.
#[derive(Debug, Clone)]
pub struct AccountState {
    /// Current projection month (1-indexed, 0 before the first month)
    pub month: u64,

    /// Simulation year (1-indexed)
    pub year: u32,

    /// Month within the simulation year (1-12)
    pub month_in_year: u32,

    /// Account value
    pub balance: f64,

    /// Dividends paid to date, reinvested or not
    pub total_dividend: f64,

    /// Deposit made each month of the current year
    pub monthly_contribution: f64,
}

impl AccountState {
    pub fn new(monthly_contribution: f64) -> Self {
        Self {
            month: 0,
            year: 1,
            month_in_year: 0,
            balance: 0.0,
            total_dividend: 0.0,
            monthly_contribution,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
        if self.month_in_year == 12 {
            self.year += 1;
            self.month_in_year = 1;
        } else {
            self.month_in_year += 1;
        }
    }

    /// Whether the current month closes a simulation year
    pub fn is_year_end(&self) -> bool {
        self.month_in_year == 12
    }
}
