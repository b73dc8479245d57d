//! Budget-vs-actual aggregation over ledger records

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use super::data::{Budget, Category, Transaction, TransactionType};

/// Budget and actual spending for one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStats {
    pub budget_amount: f64,
    pub actual_amount: f64,
    /// Actual as a percentage of budget; 0 when there is no positive budget
    pub percent: f64,
}

impl CategoryStats {
    pub fn is_over_budget(&self) -> bool {
        self.percent > 100.0
    }

    /// Progress-bar fill, clamped to 100%
    pub fn progress(&self) -> f64 {
        self.percent.min(100.0)
    }
}

/// Income, expense and expense-budget totals for a period
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerTotals {
    pub income: f64,
    pub expense: f64,
    pub expense_budget: f64,
}

impl LedgerTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Merge budgets spanning several months into one entry per category.
///
/// Each merged entry keeps the first budget's metadata; results are ordered by
/// category id.
pub fn merge_budgets_by_category(budgets: &[Budget]) -> Vec<Budget> {
    let mut merged: BTreeMap<u64, Budget> = BTreeMap::new();
    for budget in budgets {
        merged
            .entry(budget.category_id)
            .and_modify(|b| b.amount += budget.amount)
            .or_insert_with(|| budget.clone());
    }
    merged.into_values().collect()
}

/// Budget and actual spending for the category named `category_name`
pub fn category_stats(
    category_name: &str,
    budgets: &[Budget],
    transactions: &[Transaction],
) -> CategoryStats {
    let budget = budgets.iter().find(|b| b.category_name == category_name);
    let actual_amount: f64 = transactions
        .iter()
        .filter(|t| t.category_name == category_name)
        .map(|t| t.amount)
        .sum();

    let budget_amount = budget.map(|b| b.amount).unwrap_or(0.0);
    let percent = match budget {
        Some(b) if b.amount > 0.0 => actual_amount / b.amount * 100.0,
        _ => 0.0,
    };

    CategoryStats {
        budget_amount,
        actual_amount,
        percent,
    }
}

/// Sum transactions and budgets by the kind of their category.
///
/// Records whose category is unknown count toward nothing.
pub fn ledger_totals(
    categories: &[Category],
    budgets: &[Budget],
    transactions: &[Transaction],
) -> LedgerTotals {
    let kind_of = |name: &str| {
        categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.kind)
    };

    let mut totals = LedgerTotals::default();
    for tx in transactions {
        match kind_of(&tx.category_name) {
            Some(TransactionType::Income) => totals.income += tx.amount,
            Some(TransactionType::Expense) => totals.expense += tx.amount,
            _ => {}
        }
    }
    totals.expense_budget = budgets
        .iter()
        .filter(|b| kind_of(&b.category_name) == Some(TransactionType::Expense))
        .map(|b| b.amount)
        .sum();

    totals
}

/// First and last day of a calendar month, as sent to the transactions endpoint
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next.pred_opt()?))
}

/// Whether a transaction falls inside `[start, end]`
pub fn in_range(tx: &Transaction, start: NaiveDate, end: NaiveDate) -> bool {
    tx.date >= start && tx.date <= end
}

/// Year and month a transaction is booked under
pub fn booking_month(tx: &Transaction) -> (i32, u32) {
    (tx.date.year(), tx.date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::data::PaymentMethod;

    fn budget(category_id: u64, name: &str, month: u32, amount: f64) -> Budget {
        Budget {
            id: category_id * 100 + month as u64,
            year: 2026,
            month,
            amount,
            category_name: name.to_string(),
            category_id,
        }
    }

    fn tx(category: &str, amount: f64, day: u32) -> Transaction {
        Transaction {
            id: day as u64,
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            amount,
            memo: String::new(),
            payment_method: PaymentMethod::Cash,
            category_name: category.to_string(),
            category_id: 0,
            confirmed: true,
            card_id: None,
            asset_id: None,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            Category { id: 1, name: "Salary".into(), kind: TransactionType::Income },
            Category { id: 2, name: "Food".into(), kind: TransactionType::Expense },
            Category { id: 3, name: "Rent".into(), kind: TransactionType::Expense },
            Category { id: 4, name: "Move".into(), kind: TransactionType::Transfer },
        ]
    }

    #[test]
    fn test_merge_budgets_by_category() {
        let budgets = vec![
            budget(3, "Rent", 1, 500_000.0),
            budget(2, "Food", 1, 300_000.0),
            budget(3, "Rent", 2, 500_000.0),
            budget(2, "Food", 2, 350_000.0),
        ];
        let merged = merge_budgets_by_category(&budgets);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].category_name, "Food");
        assert_eq!(merged[0].amount, 650_000.0);
        assert_eq!(merged[0].month, 1);
        assert_eq!(merged[1].amount, 1_000_000.0);
    }

    #[test]
    fn test_category_stats() {
        let budgets = vec![budget(2, "Food", 3, 200_000.0)];
        let txs = vec![tx("Food", 150_000.0, 1), tx("Food", 90_000.0, 2), tx("Rent", 1.0, 3)];

        let stats = category_stats("Food", &budgets, &txs);
        assert_eq!(stats.budget_amount, 200_000.0);
        assert_eq!(stats.actual_amount, 240_000.0);
        assert_eq!(stats.percent, 120.0);
        assert!(stats.is_over_budget());
        assert_eq!(stats.progress(), 100.0);
    }

    #[test]
    fn test_category_stats_without_budget() {
        let stats = category_stats("Rent", &[budget(3, "Rent", 3, 0.0)], &[tx("Rent", 10.0, 1)]);
        assert_eq!(stats.percent, 0.0);
        let stats = category_stats("Travel", &[], &[]);
        assert_eq!(stats, CategoryStats { budget_amount: 0.0, actual_amount: 0.0, percent: 0.0 });
    }

    #[test]
    fn test_ledger_totals() {
        let budgets = vec![
            budget(1, "Salary", 3, 3_000_000.0),
            budget(2, "Food", 3, 300_000.0),
            budget(3, "Rent", 3, 700_000.0),
        ];
        let txs = vec![
            tx("Salary", 3_200_000.0, 25),
            tx("Food", 120_000.0, 2),
            tx("Rent", 700_000.0, 1),
            tx("Move", 50_000.0, 4),
            tx("Unknown", 9.0, 5),
        ];
        let totals = ledger_totals(&categories(), &budgets, &txs);
        assert_eq!(totals.income, 3_200_000.0);
        assert_eq!(totals.expense, 820_000.0);
        assert_eq!(totals.expense_budget, 1_000_000.0);
        assert_eq!(totals.net(), 2_380_000.0);
    }

    #[test]
    fn test_month_range() {
        let (start, end) = month_range(2024, 2).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, end) = month_range(2026, 12).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        assert!(month_range(2026, 13).is_none());

        let t = tx("Food", 1.0, 31);
        let (march_start, march_end) = month_range(2026, 3).unwrap();
        assert!(in_range(&t, march_start, march_end));
        assert!(!in_range(&t, start, end));
        assert_eq!(booking_month(&t), (2026, 3));
    }
}
