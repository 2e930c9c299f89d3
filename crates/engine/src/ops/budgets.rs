use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use tracing::info;

use crate::{
    Budget, BudgetCmd, EngineError, ResultEngine, budgets, util::validate_non_negative,
};

use super::{Engine, with_tx};

fn validate_budget(cmd: &BudgetCmd) -> ResultEngine<i32> {
    validate_non_negative(cmd.planned, "planned amount")?;
    if !(1..=12).contains(&cmd.month) {
        return Err(EngineError::InvalidDate(format!(
            "month must be within 1..=12, got {}",
            cmd.month
        )));
    }
    i32::try_from(cmd.month)
        .map_err(|_| EngineError::InvalidDate(format!("invalid month: {}", cmd.month)))
}

impl Engine {
    /// One budget line per `(owner, category, year, month)`.
    async fn ensure_unique_budget(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        cmd: &BudgetCmd,
        month: i32,
        except_id: Option<i64>,
    ) -> ResultEngine<()> {
        let mut query = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::CategoryId.eq(cmd.category_id))
            .filter(budgets::Column::Year.eq(cmd.year))
            .filter(budgets::Column::Month.eq(month));
        if let Some(id) = except_id {
            query = query.filter(budgets::Column::Id.ne(id));
        }
        if query.one(db_tx).await?.is_some() {
            return Err(EngineError::ExistingKey(format!(
                "budget {}-{:02} for category {}",
                cmd.year, cmd.month, cmd.category_id
            )));
        }
        Ok(())
    }

    /// Add a monthly budget line for one of the owner's categories.
    pub async fn create_budget(&self, user_id: &str, cmd: BudgetCmd) -> ResultEngine<Budget> {
        let month = validate_budget(&cmd)?;
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            self.referenced_category(&db_tx, user_id, cmd.category_id)
                .await?;
            self.ensure_unique_budget(&db_tx, user_id, &cmd, month, None)
                .await?;
            let model = budgets::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id.to_string()),
                category_id: ActiveValue::Set(cmd.category_id),
                year: ActiveValue::Set(cmd.year),
                month: ActiveValue::Set(month),
                planned_minor: ActiveValue::Set(cmd.planned.cents()),
            }
            .insert(&db_tx)
            .await?;
            info!(user_id, budget_id = model.id, "budget created");
            Budget::try_from(model)
        })
    }

    pub async fn list_budgets(&self, user_id: &str) -> ResultEngine<Vec<Budget>> {
        with_tx!(self, |db_tx| {
            budgets::Entity::find()
                .filter(budgets::Column::UserId.eq(user_id))
                .order_by_asc(budgets::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Budget::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    pub async fn budget(&self, user_id: &str, budget_id: i64) -> ResultEngine<Budget> {
        with_tx!(self, |db_tx| {
            let model = self.owned_budget(&db_tx, user_id, budget_id).await?;
            Budget::try_from(model)
        })
    }

    pub async fn update_budget(
        &self,
        user_id: &str,
        budget_id: i64,
        cmd: BudgetCmd,
    ) -> ResultEngine<Budget> {
        let month = validate_budget(&cmd)?;
        with_tx!(self, |db_tx| {
            self.owned_budget(&db_tx, user_id, budget_id).await?;
            self.referenced_category(&db_tx, user_id, cmd.category_id)
                .await?;
            self.ensure_unique_budget(&db_tx, user_id, &cmd, month, Some(budget_id))
                .await?;
            let model = budgets::ActiveModel {
                id: ActiveValue::Unchanged(budget_id),
                category_id: ActiveValue::Set(cmd.category_id),
                year: ActiveValue::Set(cmd.year),
                month: ActiveValue::Set(month),
                planned_minor: ActiveValue::Set(cmd.planned.cents()),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Budget::try_from(model)
        })
    }

    pub async fn delete_budget(&self, user_id: &str, budget_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.owned_budget(&db_tx, user_id, budget_id).await?;
            budgets::Entity::delete_by_id(budget_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
