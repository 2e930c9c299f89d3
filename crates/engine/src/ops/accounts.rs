use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*, sea_query::Expr,
};
use tracing::info;

use crate::{
    Account, AccountCmd, ResultEngine, accounts, goals, recurring_rules, transactions,
    util::{normalize_name, validate_storable},
};

use super::{Engine, with_tx};

impl Engine {
    /// Add a new account for `user_id`.
    pub async fn create_account(&self, user_id: &str, cmd: AccountCmd) -> ResultEngine<Account> {
        let name = normalize_name(&cmd.name, "account")?;
        validate_storable(cmd.opening_balance, "opening balance")?;
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            let model = accounts::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id.to_string()),
                name: ActiveValue::Set(name),
                kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
                opening_balance_minor: ActiveValue::Set(cmd.opening_balance.cents()),
            }
            .insert(&db_tx)
            .await?;
            info!(user_id, account_id = model.id, "account created");
            Account::try_from(model)
        })
    }

    /// Accounts of `user_id`, oldest first.
    pub async fn list_accounts(&self, user_id: &str) -> ResultEngine<Vec<Account>> {
        with_tx!(self, |db_tx| {
            accounts::Entity::find()
                .filter(accounts::Column::UserId.eq(user_id))
                .order_by_asc(accounts::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Account::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Return one account snapshot from DB.
    pub async fn account(&self, user_id: &str, account_id: i64) -> ResultEngine<Account> {
        with_tx!(self, |db_tx| {
            let model = self.owned_account(&db_tx, user_id, account_id).await?;
            Account::try_from(model)
        })
    }

    /// Replace the editable fields of an account.
    pub async fn update_account(
        &self,
        user_id: &str,
        account_id: i64,
        cmd: AccountCmd,
    ) -> ResultEngine<Account> {
        let name = normalize_name(&cmd.name, "account")?;
        validate_storable(cmd.opening_balance, "opening balance")?;
        with_tx!(self, |db_tx| {
            self.owned_account(&db_tx, user_id, account_id).await?;
            let model = accounts::ActiveModel {
                id: ActiveValue::Unchanged(account_id),
                name: ActiveValue::Set(name),
                kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
                opening_balance_minor: ActiveValue::Set(cmd.opening_balance.cents()),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Account::try_from(model)
        })
    }

    /// Delete an account.
    ///
    /// Its transactions go with it; goals tracking it keep existing without an
    /// account.
    pub async fn delete_account(&self, user_id: &str, account_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.owned_account(&db_tx, user_id, account_id).await?;

            let tx_ids: Vec<i64> = transactions::Entity::find()
                .filter(transactions::Column::AccountId.eq(account_id))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|model| model.id)
                .collect();
            recurring_rules::Entity::delete_many()
                .filter(recurring_rules::Column::TransactionTemplateId.is_in(tx_ids))
                .exec(&db_tx)
                .await?;
            transactions::Entity::delete_many()
                .filter(transactions::Column::AccountId.eq(account_id))
                .exec(&db_tx)
                .await?;
            goals::Entity::update_many()
                .col_expr(goals::Column::AccountId, Expr::value(Option::<i64>::None))
                .filter(goals::Column::AccountId.eq(account_id))
                .exec(&db_tx)
                .await?;
            accounts::Entity::delete_by_id(account_id)
                .exec(&db_tx)
                .await?;
            info!(user_id, account_id, "account deleted");
            Ok(())
        })
    }
}
