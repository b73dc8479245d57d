//! Ledger and holdings records with the aggregation done on top of them

mod budget;
mod data;
mod portfolio;

pub use budget::{
    booking_month, category_stats, in_range, ledger_totals, merge_budgets_by_category,
    month_range, CategoryStats, LedgerTotals,
};
pub use data::{Budget, Category, PaymentMethod, Transaction, TransactionType};
pub use portfolio::{portfolio_summary, MyStock, PortfolioSummary};
