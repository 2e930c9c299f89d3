//! Budget utilisation for a period.

use std::collections::HashMap;

use tracing::debug;

use crate::{Budget, MoneyCents, Period, Transaction, TransactionKind};

use super::{BudgetLine, BudgetStatus};

/// Evaluate the budgets of the period's start month against the period's
/// expenses.
///
/// Only budgets whose `(year, month)` equals the start bound's month are
/// considered, even when the period covers more months. Lines come back in
/// budget id order.
#[must_use]
pub fn evaluate(
    period: &Period,
    budgets: &[Budget],
    transactions: &[Transaction],
    category_names: &HashMap<i64, &str>,
) -> Vec<BudgetLine> {
    if period.spans_multiple_months() {
        debug!(
            start = %period.start,
            end = %period.end,
            "period spans several months, budgets matched on start month"
        );
    }
    let (year, month) = period.start_month();

    let mut spent_by_category: HashMap<i64, MoneyCents> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense && period.contains(tx.date))
    {
        if let Some(category_id) = tx.category_id {
            *spent_by_category.entry(category_id).or_default() += tx.amount;
        }
    }

    let mut lines: Vec<BudgetLine> = budgets
        .iter()
        .filter(|b| b.year == year && b.month == month)
        .map(|budget| {
            let spent = spent_by_category
                .get(&budget.category_id)
                .copied()
                .unwrap_or_default();
            line(budget, spent, category_names)
        })
        .collect();
    lines.sort_by_key(|line| line.budget_id);
    lines
}

fn line(budget: &Budget, spent: MoneyCents, category_names: &HashMap<i64, &str>) -> BudgetLine {
    let remaining = (budget.planned - spent).max(MoneyCents::ZERO);
    let status = if spent <= budget.planned {
        BudgetStatus::Ok
    } else {
        BudgetStatus::Over
    };
    BudgetLine {
        budget_id: budget.id,
        category_id: budget.category_id,
        category: category_names
            .get(&budget.category_id)
            .map(|name| (*name).to_string())
            .unwrap_or_default(),
        planned: budget.planned,
        spent,
        remaining,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{date, tx};
    use super::*;

    fn budget(id: i64, category_id: i64, year: i32, month: u32, cents: i64) -> Budget {
        Budget {
            id,
            user_id: "alice".to_string(),
            category_id,
            year,
            month,
            planned: MoneyCents::new(cents),
        }
    }

    fn names() -> HashMap<i64, &'static str> {
        HashMap::from([(1, "Food"), (2, "Transport")])
    }

    #[test]
    fn spent_exactly_planned_is_ok() {
        let period = Period::month_of(date(2024, 1, 1));
        let txs = vec![tx(1, TransactionKind::Expense, 30_000, Some(1), date(2024, 1, 3))];
        let lines = evaluate(&period, &[budget(1, 1, 2024, 1, 30_000)], &txs, &names());
        assert_eq!(lines[0].status, BudgetStatus::Ok);
        assert_eq!(lines[0].remaining, MoneyCents::ZERO);
        assert_eq!(lines[0].category, "Food");
    }

    #[test]
    fn overspent_line_has_no_negative_remaining() {
        let period = Period::month_of(date(2024, 1, 1));
        let txs = vec![tx(1, TransactionKind::Expense, 40_000, Some(1), date(2024, 1, 3))];
        let lines = evaluate(&period, &[budget(1, 1, 2024, 1, 30_000)], &txs, &names());
        assert_eq!(lines[0].spent.to_string(), "400.00");
        assert_eq!(lines[0].remaining.to_string(), "0.00");
        assert_eq!(lines[0].status, BudgetStatus::Over);
    }

    #[test]
    fn only_start_month_budgets_are_evaluated() {
        let period = Period {
            start: date(2024, 1, 20),
            end: date(2024, 2, 10),
        };
        let txs = vec![
            tx(1, TransactionKind::Expense, 1_000, Some(2), date(2024, 1, 25)),
            tx(2, TransactionKind::Expense, 2_000, Some(2), date(2024, 2, 5)),
            tx(3, TransactionKind::Income, 9_000, Some(2), date(2024, 2, 5)),
        ];
        let budgets = [
            budget(5, 2, 2024, 2, 10_000),
            budget(4, 2, 2024, 1, 10_000),
            budget(2, 1, 2024, 1, 500),
        ];
        let lines = evaluate(&period, &budgets, &txs, &names());
        let ids: Vec<i64> = lines.iter().map(|l| l.budget_id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(lines[0].spent, MoneyCents::ZERO);
        assert_eq!(lines[1].spent, MoneyCents::new(3_000));
        assert_eq!(lines[1].remaining, MoneyCents::new(7_000));
    }
}
