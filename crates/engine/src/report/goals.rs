//! Goal progress against a linked account's running balance.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{Account, Goal, MoneyCents, Transaction};

use super::GoalProgress;

/// Net movement of `account_id` up to and including `end`.
///
/// The opening balance is not part of the estimate.
#[must_use]
pub fn account_balance(account_id: i64, transactions: &[Transaction], end: NaiveDate) -> MoneyCents {
    transactions
        .iter()
        .filter(|tx| tx.account_id == account_id && tx.date <= end)
        .map(Transaction::signed_amount)
        .sum()
}

/// `floor(balance / target * 100)` clamped to `0..=100`; a zero target gives 0.
#[must_use]
pub fn progress_percent(balance: MoneyCents, target: MoneyCents) -> u8 {
    if !target.is_positive() {
        return 0;
    }
    let ratio = i128::from(balance.cents()) * 100 / i128::from(target.cents());
    // Clamped first, so the narrowing cannot fail.
    u8::try_from(ratio.clamp(0, 100)).unwrap_or(0)
}

/// Progress of every goal, in goal id order.
#[must_use]
pub fn estimate(
    end: NaiveDate,
    goals: &[Goal],
    accounts: &[Account],
    transactions: &[Transaction],
) -> Vec<GoalProgress> {
    let accounts_by_id: HashMap<i64, &Account> = accounts.iter().map(|a| (a.id, a)).collect();

    let mut out: Vec<GoalProgress> = goals
        .iter()
        .map(|goal| {
            let account = goal.account_id.and_then(|id| accounts_by_id.get(&id));
            let estimated_balance =
                account.map(|account| account_balance(account.id, transactions, end));
            GoalProgress {
                goal_id: goal.id,
                goal: goal.name.clone(),
                target_amount: goal.target_amount,
                due_date: goal.due_date,
                account: account.map(|a| a.name.clone()),
                estimated_balance,
                progress_percent: estimated_balance
                    .map(|balance| progress_percent(balance, goal.target_amount))
                    .unwrap_or(0),
            }
        })
        .collect();
    out.sort_by_key(|progress| progress.goal_id);
    out
}
