//! Period reports.
//!
//! Everything in this module is pure: the store materialises owner-scoped
//! rows and the functions here fold them into a [`Report`]. Empty inputs give
//! zero totals and empty lists, never an error.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Account, Budget, Category, Goal, MoneyCents, Period, Transaction};

pub mod aggregation;
pub mod budgets;
pub mod goals;

/// Income/expense totals of a transaction set. Transfers count for neither.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: MoneyCents,
    pub expense: MoneyCents,
    /// `income - expense`, may be negative.
    pub balance: MoneyCents,
}

/// One row of the expense breakdown. Uncategorised expenses share the row
/// with no id and no name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category_id: Option<i64>,
    pub category: Option<String>,
    pub total: MoneyCents,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetStatus {
    Ok,
    Over,
}

impl BudgetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Over => "OVER",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub budget_id: i64,
    pub category_id: i64,
    pub category: String,
    pub planned: MoneyCents,
    pub spent: MoneyCents,
    /// `max(0, planned - spent)`.
    pub remaining: MoneyCents,
    pub status: BudgetStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: i64,
    pub goal: String,
    pub target_amount: MoneyCents,
    pub due_date: Option<NaiveDate>,
    /// Linked account name, absent when the goal tracks no account.
    pub account: Option<String>,
    pub estimated_balance: Option<MoneyCents>,
    /// Always within `0..=100`.
    pub progress_percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub period: Period,
    pub totals: Totals,
    pub by_category_expense: Vec<CategoryExpense>,
    pub budgets: Vec<BudgetLine>,
    pub goals: Vec<GoalProgress>,
}

/// Owner-scoped rows a report is computed from.
#[derive(Clone, Copy, Debug)]
pub struct ReportInputs<'a> {
    /// Transactions dated inside the period.
    pub period_transactions: &'a [Transaction],
    /// Transactions of goal-linked accounts dated on or before the period end.
    pub goal_transactions: &'a [Transaction],
    pub categories: &'a [Category],
    pub accounts: &'a [Account],
    pub budgets: &'a [Budget],
    pub goals: &'a [Goal],
}

/// Merge the aggregation, budget and goal results for one period.
#[must_use]
pub fn build(period: Period, inputs: &ReportInputs<'_>) -> Report {
    let category_names: HashMap<i64, &str> = inputs
        .categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    Report {
        period,
        totals: aggregation::totals(inputs.period_transactions),
        by_category_expense: aggregation::expense_by_category(
            inputs.period_transactions,
            &category_names,
        ),
        budgets: budgets::evaluate(
            &period,
            inputs.budgets,
            inputs.period_transactions,
            &category_names,
        ),
        goals: goals::estimate(period.end, inputs.goals, inputs.accounts, inputs.goal_transactions),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;

    use crate::{MoneyCents, Transaction, TransactionKind};

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn tx(
        id: i64,
        kind: TransactionKind,
        cents: i64,
        category_id: Option<i64>,
        date: NaiveDate,
    ) -> Transaction {
        Transaction {
            id,
            user_id: "alice".to_string(),
            account_id: 1,
            category_id,
            kind,
            amount: MoneyCents::new(cents),
            date,
            note: String::new(),
            is_recurring: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{date, tx};
    use super::*;
    use crate::{CategoryType, TransactionKind};

    #[test]
    fn empty_period_reports_zeroes() {
        let period = Period::month_of(date(2024, 1, 10));
        let report = build(
            period,
            &ReportInputs {
                period_transactions: &[],
                goal_transactions: &[],
                categories: &[],
                accounts: &[],
                budgets: &[],
                goals: &[],
            },
        );
        assert_eq!(report.totals, Totals::default());
        assert_eq!(report.totals.balance.to_string(), "0.00");
        assert!(report.by_category_expense.is_empty());
        assert!(report.budgets.is_empty());
        assert!(report.goals.is_empty());
    }

    #[test]
    fn salary_and_food_month() {
        let period = Period::month_of(date(2024, 1, 10));
        let categories = vec![Category {
            id: 7,
            user_id: "alice".to_string(),
            name: "Food".to_string(),
            category_type: CategoryType::Expense,
            parent_id: None,
        }];
        let txs = vec![
            tx(1, TransactionKind::Income, 100_000, None, date(2024, 1, 5)),
            tx(2, TransactionKind::Expense, 40_000, Some(7), date(2024, 1, 6)),
        ];
        let budgets = vec![Budget {
            id: 3,
            user_id: "alice".to_string(),
            category_id: 7,
            year: 2024,
            month: 1,
            planned: MoneyCents::new(30_000),
        }];
        let report = build(
            period,
            &ReportInputs {
                period_transactions: &txs,
                goal_transactions: &[],
                categories: &categories,
                accounts: &[],
                budgets: &budgets,
                goals: &[],
            },
        );

        assert_eq!(report.totals.income.to_string(), "1000.00");
        assert_eq!(report.totals.expense.to_string(), "400.00");
        assert_eq!(report.totals.balance.to_string(), "600.00");
        assert_eq!(
            report.by_category_expense,
            vec![CategoryExpense {
                category_id: Some(7),
                category: Some("Food".to_string()),
                total: MoneyCents::new(40_000),
            }]
        );
        let line = &report.budgets[0];
        assert_eq!(line.spent, MoneyCents::new(40_000));
        assert_eq!(line.remaining, MoneyCents::ZERO);
        assert_eq!(line.status, BudgetStatus::Over);
    }
}
