use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use tracing::{debug, info};

use crate::{
    Account, AccountKind, Budget, Category, CategoryType, Goal, Period, ResultEngine, Transaction,
    accounts, budgets, categories, export, goals,
    report::{self, Report, ReportInputs},
    transactions,
};

use super::{Engine, TransactionListFilter, with_tx};

const DEFAULT_INCOME_CATEGORIES: [&str; 3] = ["Salary", "Freelance", "Investments"];
const DEFAULT_EXPENSE_CATEGORIES: [&str; 7] = [
    "Food",
    "Transport",
    "Housing",
    "Health",
    "Education",
    "Leisure",
    "Bills",
];
const DEFAULT_ACCOUNT: &str = "Wallet";

/// Outcome of [`Engine::seed_defaults`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub accounts_created: usize,
}

impl Engine {
    async fn owner_categories(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
    ) -> ResultEngine<Vec<Category>> {
        categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .order_by_asc(categories::Column::Id)
            .all(db_tx)
            .await?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    async fn owner_accounts(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
    ) -> ResultEngine<Vec<Account>> {
        accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_asc(accounts::Column::Id)
            .all(db_tx)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    /// Build the dashboard report of `user_id` for the resolved period.
    ///
    /// `start_raw` and `end_raw` are untrusted `YYYY-MM-DD` strings; anything
    /// unparsable falls back to the bounds of the month containing `today`.
    pub async fn report(
        &self,
        user_id: &str,
        start_raw: Option<&str>,
        end_raw: Option<&str>,
        today: NaiveDate,
    ) -> ResultEngine<Report> {
        let period = Period::resolve(start_raw, end_raw, today);
        debug!(user_id, start = %period.start, end = %period.end, "building report");
        with_tx!(self, |db_tx| {
            let period_transactions = self
                .filtered_transactions(
                    &db_tx,
                    user_id,
                    &TransactionListFilter {
                        start: Some(period.start),
                        end: Some(period.end),
                        ..Default::default()
                    },
                )
                .await?;
            let categories = self.owner_categories(&db_tx, user_id).await?;
            let accounts = self.owner_accounts(&db_tx, user_id).await?;

            let (year, month) = period.start_month();
            let budgets = budgets::Entity::find()
                .filter(budgets::Column::UserId.eq(user_id))
                .filter(budgets::Column::Year.eq(year))
                .filter(budgets::Column::Month.eq(i32::try_from(month).unwrap_or_default()))
                .order_by_asc(budgets::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Budget::try_from)
                .collect::<ResultEngine<Vec<_>>>()?;

            let goals: Vec<Goal> = goals::Entity::find()
                .filter(goals::Column::UserId.eq(user_id))
                .order_by_asc(goals::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Goal::from)
                .collect();

            let goal_account_ids: Vec<i64> = goals.iter().filter_map(|g| g.account_id).collect();
            let goal_transactions = if goal_account_ids.is_empty() {
                Vec::new()
            } else {
                transactions::Entity::find()
                    .filter(transactions::Column::UserId.eq(user_id))
                    .filter(transactions::Column::AccountId.is_in(goal_account_ids))
                    .filter(transactions::Column::Date.lte(period.end))
                    .all(&db_tx)
                    .await?
                    .into_iter()
                    .map(Transaction::try_from)
                    .collect::<ResultEngine<Vec<_>>>()?
            };

            Ok(report::build(
                period,
                &ReportInputs {
                    period_transactions: &period_transactions,
                    goal_transactions: &goal_transactions,
                    categories: &categories,
                    accounts: &accounts,
                    budgets: &budgets,
                    goals: &goals,
                },
            ))
        })
    }

    /// Render the owner's transactions matching `filter` as CSV, in listing
    /// order.
    pub async fn export_transactions(
        &self,
        user_id: &str,
        filter: &TransactionListFilter,
    ) -> ResultEngine<String> {
        with_tx!(self, |db_tx| {
            let rows = self.filtered_transactions(&db_tx, user_id, filter).await?;
            let account_names: HashMap<i64, String> = self
                .owner_accounts(&db_tx, user_id)
                .await?
                .into_iter()
                .map(|a| (a.id, a.name))
                .collect();
            let category_names: HashMap<i64, String> = self
                .owner_categories(&db_tx, user_id)
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect();
            debug!(user_id, rows = rows.len(), "exporting transactions");
            export::transactions_csv(&rows, &account_names, &category_names)
        })
    }

    /// Create the default categories and wallet account of a new owner.
    ///
    /// Running it again only fills in what is missing.
    pub async fn seed_defaults(&self, user_id: &str) -> ResultEngine<SeedSummary> {
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            let existing = self.owner_categories(&db_tx, user_id).await?;
            let mut summary = SeedSummary::default();

            let defaults = DEFAULT_INCOME_CATEGORIES
                .iter()
                .map(|name| (*name, CategoryType::Income))
                .chain(
                    DEFAULT_EXPENSE_CATEGORIES
                        .iter()
                        .map(|name| (*name, CategoryType::Expense)),
                );
            for (name, category_type) in defaults {
                let present = existing
                    .iter()
                    .any(|c| c.name == name && c.category_type == category_type);
                if present {
                    continue;
                }
                categories::ActiveModel {
                    id: ActiveValue::NotSet,
                    user_id: ActiveValue::Set(user_id.to_string()),
                    name: ActiveValue::Set(name.to_string()),
                    category_type: ActiveValue::Set(category_type.as_str().to_string()),
                    parent_id: ActiveValue::Set(None),
                }
                .insert(&db_tx)
                .await?;
                summary.categories_created += 1;
            }

            let has_wallet = accounts::Entity::find()
                .filter(accounts::Column::UserId.eq(user_id))
                .filter(accounts::Column::Name.eq(DEFAULT_ACCOUNT))
                .filter(accounts::Column::Kind.eq(AccountKind::Wallet.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if !has_wallet {
                accounts::ActiveModel {
                    id: ActiveValue::NotSet,
                    user_id: ActiveValue::Set(user_id.to_string()),
                    name: ActiveValue::Set(DEFAULT_ACCOUNT.to_string()),
                    kind: ActiveValue::Set(AccountKind::Wallet.as_str().to_string()),
                    opening_balance_minor: ActiveValue::Set(0),
                }
                .insert(&db_tx)
                .await?;
                summary.accounts_created += 1;
            }

            info!(
                user_id,
                categories = summary.categories_created,
                accounts = summary.accounts_created,
                "defaults seeded"
            );
            Ok(summary)
        })
    }
}
