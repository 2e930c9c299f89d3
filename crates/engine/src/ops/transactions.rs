use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use tracing::info;

use crate::{
    ResultEngine, Transaction, TransactionCmd, TransactionKind, recurring_rules, transactions,
    util::{normalize_note, validate_transaction_amount},
};

use super::{Engine, with_tx};

/// Filters for listing and exporting transactions.
///
/// Both date bounds are inclusive. Absent fields do not restrict the result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionListFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub account_id: Option<i64>,
    pub category_id: Option<i64>,
}

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionListFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionListFilter) -> Self {
        if let Some(start) = filter.start {
            self = self.filter(transactions::Column::Date.gte(start));
        }
        if let Some(end) = filter.end {
            self = self.filter(transactions::Column::Date.lte(end));
        }
        if let Some(kind) = filter.kind {
            self = self.filter(transactions::Column::Kind.eq(kind.as_str()));
        }
        if let Some(account_id) = filter.account_id {
            self = self.filter(transactions::Column::AccountId.eq(account_id));
        }
        if let Some(category_id) = filter.category_id {
            self = self.filter(transactions::Column::CategoryId.eq(category_id));
        }
        self
    }
}

/// Validated column values shared by create and update.
struct TransactionFields {
    account_id: i64,
    category_id: Option<i64>,
    kind: TransactionKind,
    amount_minor: i64,
    date: NaiveDate,
    note: String,
    is_recurring: bool,
}

impl Engine {
    async fn transaction_fields(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        cmd: TransactionCmd,
    ) -> ResultEngine<TransactionFields> {
        validate_transaction_amount(cmd.amount)?;
        let note = normalize_note(cmd.note.as_deref())?;
        self.referenced_account(db_tx, user_id, cmd.account_id)
            .await?;
        if let Some(category_id) = cmd.category_id {
            self.referenced_category(db_tx, user_id, category_id)
                .await?;
        }
        Ok(TransactionFields {
            account_id: cmd.account_id,
            category_id: cmd.category_id,
            kind: cmd.kind,
            amount_minor: cmd.amount.cents(),
            date: cmd.date,
            note,
            is_recurring: cmd.is_recurring,
        })
    }

    /// Owner's transactions matching `filter`, newest date first and, within
    /// one day, most recently created first.
    pub(super) async fn filtered_transactions(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        filter: &TransactionListFilter,
    ) -> ResultEngine<Vec<Transaction>> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .apply_tx_filters(filter)
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::Id)
            .all(db_tx)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    /// Record a new transaction on one of the owner's accounts.
    pub async fn create_transaction(
        &self,
        user_id: &str,
        cmd: TransactionCmd,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            let fields = self.transaction_fields(&db_tx, user_id, cmd).await?;
            let model = transactions::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id.to_string()),
                account_id: ActiveValue::Set(fields.account_id),
                category_id: ActiveValue::Set(fields.category_id),
                kind: ActiveValue::Set(fields.kind.as_str().to_string()),
                amount_minor: ActiveValue::Set(fields.amount_minor),
                date: ActiveValue::Set(fields.date),
                note: ActiveValue::Set(fields.note),
                is_recurring: ActiveValue::Set(fields.is_recurring),
            }
            .insert(&db_tx)
            .await?;
            info!(
                user_id,
                transaction_id = model.id,
                kind = fields.kind.as_str(),
                "transaction created"
            );
            Transaction::try_from(model)
        })
    }

    /// Lists the owner's transactions.
    ///
    /// Ordering is `(date DESC, id DESC)`.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        filter: &TransactionListFilter,
    ) -> ResultEngine<Vec<Transaction>> {
        with_tx!(self, |db_tx| {
            self.filtered_transactions(&db_tx, user_id, filter).await
        })
    }

    pub async fn transaction(
        &self,
        user_id: &str,
        transaction_id: i64,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let model = self
                .owned_transaction(&db_tx, user_id, transaction_id)
                .await?;
            Transaction::try_from(model)
        })
    }

    /// Replace every editable field of a transaction.
    pub async fn update_transaction(
        &self,
        user_id: &str,
        transaction_id: i64,
        cmd: TransactionCmd,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            self.owned_transaction(&db_tx, user_id, transaction_id)
                .await?;
            let fields = self.transaction_fields(&db_tx, user_id, cmd).await?;
            let model = transactions::ActiveModel {
                id: ActiveValue::Unchanged(transaction_id),
                account_id: ActiveValue::Set(fields.account_id),
                category_id: ActiveValue::Set(fields.category_id),
                kind: ActiveValue::Set(fields.kind.as_str().to_string()),
                amount_minor: ActiveValue::Set(fields.amount_minor),
                date: ActiveValue::Set(fields.date),
                note: ActiveValue::Set(fields.note),
                is_recurring: ActiveValue::Set(fields.is_recurring),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Transaction::try_from(model)
        })
    }

    /// Delete a transaction and the recurring rules using it as template.
    pub async fn delete_transaction(&self, user_id: &str, transaction_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.owned_transaction(&db_tx, user_id, transaction_id)
                .await?;
            recurring_rules::Entity::delete_many()
                .filter(recurring_rules::Column::TransactionTemplateId.eq(transaction_id))
                .exec(&db_tx)
                .await?;
            transactions::Entity::delete_by_id(transaction_id)
                .exec(&db_tx)
                .await?;
            info!(user_id, transaction_id, "transaction deleted");
            Ok(())
        })
    }
}
