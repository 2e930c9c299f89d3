//! Income/expense totals and the per-category expense breakdown.

use std::{cmp::Reverse, collections::HashMap};

use crate::{MoneyCents, Transaction, TransactionKind};

use super::{CategoryExpense, Totals};

#[must_use]
pub fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions.iter().fold(
        (MoneyCents::ZERO, MoneyCents::ZERO),
        |(income, expense), tx| match tx.kind {
            TransactionKind::Income => (income + tx.amount, expense),
            TransactionKind::Expense => (income, expense + tx.amount),
            TransactionKind::Transfer => (income, expense),
        },
    );
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Group expenses by category and sum each group.
///
/// Rows are ordered by descending total; ties go to the lower category id and
/// the uncategorised row sorts after every categorised row with the same
/// total.
#[must_use]
pub fn expense_by_category(
    transactions: &[Transaction],
    category_names: &HashMap<i64, &str>,
) -> Vec<CategoryExpense> {
    let mut groups: HashMap<Option<i64>, MoneyCents> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionKind::Expense)
    {
        *groups.entry(tx.category_id).or_default() += tx.amount;
    }

    let mut rows: Vec<CategoryExpense> = groups
        .into_iter()
        .map(|(category_id, total)| CategoryExpense {
            category_id,
            category: category_id
                .and_then(|id| category_names.get(&id))
                .map(|name| (*name).to_string()),
            total,
        })
        .collect();
    rows.sort_by_key(|row| (Reverse(row.total), row.category_id.is_none(), row.category_id));
    rows
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{date, tx};
    use super::*;

    fn names() -> HashMap<i64, &'static str> {
        HashMap::from([(1, "Food"), (2, "Transport"), (3, "Leisure")])
    }

    #[test]
    fn transfers_are_ignored() {
        let d = date(2024, 1, 1);
        let txs = vec![
            tx(1, TransactionKind::Income, 500, None, d),
            tx(2, TransactionKind::Transfer, 10_000, None, d),
            tx(3, TransactionKind::Expense, 700, Some(1), d),
        ];
        let totals = totals(&txs);
        assert_eq!(totals.income, MoneyCents::new(500));
        assert_eq!(totals.expense, MoneyCents::new(700));
        assert_eq!(totals.balance, MoneyCents::new(-200));
        assert_eq!(totals.balance.to_string(), "-2.00");
    }

    #[test]
    fn breakdown_order_is_deterministic() {
        let d = date(2024, 1, 1);
        let txs = vec![
            tx(1, TransactionKind::Expense, 300, Some(3), d),
            tx(2, TransactionKind::Expense, 300, None, d),
            tx(3, TransactionKind::Expense, 900, Some(2), d),
            tx(4, TransactionKind::Expense, 100, Some(1), d),
            tx(5, TransactionKind::Expense, 200, Some(1), d),
            tx(6, TransactionKind::Income, 5_000, Some(2), d),
        ];
        let rows = expense_by_category(&txs, &names());
        let order: Vec<Option<i64>> = rows.iter().map(|r| r.category_id).collect();
        assert_eq!(order, vec![Some(2), Some(1), Some(3), None]);
        assert_eq!(rows[1].total, MoneyCents::new(300));
        assert_eq!(rows[3].category, None);
    }

    #[test]
    fn breakdown_sums_to_expense_total() {
        let d = date(2024, 1, 1);
        let txs = vec![
            tx(1, TransactionKind::Expense, 1_234, Some(1), d),
            tx(2, TransactionKind::Expense, 4_321, None, d),
            tx(3, TransactionKind::Expense, 55, Some(2), d),
        ];
        let rows = expense_by_category(&txs, &names());
        let sum: MoneyCents = rows.iter().map(|r| r.total).sum();
        assert_eq!(sum, totals(&txs).expense);
    }
}
