//! US stock holdings and the portfolio totals shown above the holdings table

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One holding as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyStock {
    pub id: u64,
    pub ticker: String,
    pub company_name: String,
    /// Average purchase price per share, in USD
    pub purchase_price: f64,
    pub quantity: u32,
    /// Last synced price; absent until the first sync
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub valuation: Option<f64>,
    /// Per-share return in percent
    #[serde(default)]
    pub return_rate: Option<f64>,
    #[serde(default)]
    pub last_synced_at: Option<NaiveDateTime>,
}

impl MyStock {
    pub fn new(
        id: u64,
        ticker: impl Into<String>,
        company_name: impl Into<String>,
        purchase_price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            ticker: ticker.into(),
            company_name: company_name.into(),
            purchase_price,
            quantity,
            current_price: None,
            valuation: None,
            return_rate: None,
            last_synced_at: None,
        }
    }

    /// Record a synced price and derive valuation and return rate from it.
    ///
    /// The return rate is rounded to four places as a ratio (two as a
    /// percentage) and is left empty when the purchase price is not positive.
    pub fn apply_price(&mut self, price: f64, synced_at: NaiveDateTime) {
        self.current_price = Some(price);
        self.valuation = Some(price * f64::from(self.quantity));
        self.return_rate = (self.purchase_price > 0.0).then(|| {
            let ratio = (price - self.purchase_price) / self.purchase_price;
            (ratio * 10_000.0).round() / 100.0
        });
        self.last_synced_at = Some(synced_at);
    }

    /// Cost basis of the holding
    pub fn invested(&self) -> f64 {
        self.purchase_price * f64::from(self.quantity)
    }

    /// Current valuation, falling back to cost basis before the first sync
    pub fn valuation_or_cost(&self) -> f64 {
        self.valuation.unwrap_or_else(|| self.invested())
    }
}

/// Totals across every holding
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_invested: f64,
    pub total_valuation: f64,
    /// Overall return in percent; 0 when nothing is invested
    pub total_return: f64,
}

impl PortfolioSummary {
    pub fn profit(&self) -> f64 {
        self.total_valuation - self.total_invested
    }
}

pub fn portfolio_summary(stocks: &[MyStock]) -> PortfolioSummary {
    let total_invested: f64 = stocks.iter().map(MyStock::invested).sum();
    let total_valuation: f64 = stocks.iter().map(MyStock::valuation_or_cost).sum();
    let total_return = if total_invested > 0.0 {
        (total_valuation - total_invested) / total_invested * 100.0
    } else {
        0.0
    };

    PortfolioSummary {
        total_invested,
        total_valuation,
        total_return,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn synced_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_apply_price() {
        let mut stock = MyStock::new(1, "AAPL", "Apple Inc.", 150.0, 10);
        stock.apply_price(180.0, synced_at());
        assert_eq!(stock.valuation, Some(1_800.0));
        assert_eq!(stock.return_rate, Some(20.0));

        // 1/3 gain rounds to 33.33%
        let mut stock = MyStock::new(2, "MSFT", "Microsoft", 300.0, 1);
        stock.apply_price(400.0, synced_at());
        assert_eq!(stock.return_rate, Some(33.33));
    }

    #[test]
    fn test_zero_purchase_price_has_no_return_rate() {
        let mut stock = MyStock::new(1, "GIFT", "Gifted shares", 0.0, 5);
        stock.apply_price(10.0, synced_at());
        assert_eq!(stock.valuation, Some(50.0));
        assert_eq!(stock.return_rate, None);
    }

    #[test]
    fn test_summary_with_unsynced_holding() {
        let mut synced = MyStock::new(1, "AAPL", "Apple Inc.", 150.0, 10);
        synced.apply_price(180.0, synced_at());
        let unsynced = MyStock::new(2, "NVDA", "NVIDIA", 100.0, 5);

        let summary = portfolio_summary(&[synced, unsynced]);
        assert_eq!(summary.total_invested, 2_000.0);
        // Unsynced holding counts at cost
        assert_eq!(summary.total_valuation, 2_300.0);
        assert_eq!(summary.profit(), 300.0);
        assert_relative_eq!(summary.total_return, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_with_nothing_invested() {
        assert_eq!(portfolio_summary(&[]), PortfolioSummary::default());

        let mut free = MyStock::new(1, "GIFT", "Gifted shares", 0.0, 5);
        free.apply_price(10.0, synced_at());
        let summary = portfolio_summary(&[free]);
        assert_eq!(summary.total_invested, 0.0);
        assert_eq!(summary.total_valuation, 50.0);
        assert_eq!(summary.total_return, 0.0);
    }

    #[test]
    fn test_deserialize_backend_json() {
        let json = r#"[
            {"id": 1, "ticker": "AAPL", "companyName": "Apple Inc.",
             "purchasePrice": 150.0, "quantity": 10, "currentPrice": 165.0,
             "valuation": 1650.0, "returnRate": 10.0,
             "lastSyncedAt": "2026-03-02T09:30:00"},
            {"id": 2, "ticker": "NVDA", "companyName": "NVIDIA",
             "purchasePrice": 100.0, "quantity": 5, "currentPrice": null,
             "valuation": null, "returnRate": null, "lastSyncedAt": null}
        ]"#;
        let stocks: Vec<MyStock> = serde_json::from_str(json).unwrap();
        assert_eq!(stocks[0].last_synced_at, Some(synced_at()));
        assert_eq!(stocks[1].valuation, None);

        let summary = portfolio_summary(&stocks);
        assert_eq!(summary.total_invested, 2_000.0);
        assert_eq!(summary.total_valuation, 2_150.0);
        assert_relative_eq!(summary.total_return, 7.5, epsilon = 1e-12);
    }
}
