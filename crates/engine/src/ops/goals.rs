use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use tracing::info;

use crate::{
    Goal, GoalCmd, ResultEngine, goals,
    util::{normalize_name, validate_non_negative},
};

use super::{Engine, with_tx};

impl Engine {
    /// Add a savings goal, optionally tracked against one of the owner's
    /// accounts.
    pub async fn create_goal(&self, user_id: &str, cmd: GoalCmd) -> ResultEngine<Goal> {
        let name = normalize_name(&cmd.name, "goal")?;
        validate_non_negative(cmd.target_amount, "target amount")?;
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            if let Some(account_id) = cmd.account_id {
                self.referenced_account(&db_tx, user_id, account_id)
                    .await?;
            }
            let model = goals::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id.to_string()),
                name: ActiveValue::Set(name),
                target_amount_minor: ActiveValue::Set(cmd.target_amount.cents()),
                due_date: ActiveValue::Set(cmd.due_date),
                account_id: ActiveValue::Set(cmd.account_id),
            }
            .insert(&db_tx)
            .await?;
            info!(user_id, goal_id = model.id, "goal created");
            Ok(Goal::from(model))
        })
    }

    pub async fn list_goals(&self, user_id: &str) -> ResultEngine<Vec<Goal>> {
        with_tx!(self, |db_tx| {
            let models = goals::Entity::find()
                .filter(goals::Column::UserId.eq(user_id))
                .order_by_asc(goals::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(models.into_iter().map(Goal::from).collect::<Vec<_>>())
        })
    }

    pub async fn goal(&self, user_id: &str, goal_id: i64) -> ResultEngine<Goal> {
        with_tx!(self, |db_tx| {
            let model = self.owned_goal(&db_tx, user_id, goal_id).await?;
            Ok(Goal::from(model))
        })
    }

    pub async fn update_goal(
        &self,
        user_id: &str,
        goal_id: i64,
        cmd: GoalCmd,
    ) -> ResultEngine<Goal> {
        let name = normalize_name(&cmd.name, "goal")?;
        validate_non_negative(cmd.target_amount, "target amount")?;
        with_tx!(self, |db_tx| {
            self.owned_goal(&db_tx, user_id, goal_id).await?;
            if let Some(account_id) = cmd.account_id {
                self.referenced_account(&db_tx, user_id, account_id)
                    .await?;
            }
            let model = goals::ActiveModel {
                id: ActiveValue::Unchanged(goal_id),
                name: ActiveValue::Set(name),
                target_amount_minor: ActiveValue::Set(cmd.target_amount.cents()),
                due_date: ActiveValue::Set(cmd.due_date),
                account_id: ActiveValue::Set(cmd.account_id),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Ok(Goal::from(model))
        })
    }

    pub async fn delete_goal(&self, user_id: &str, goal_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.owned_goal(&db_tx, user_id, goal_id).await?;
            goals::Entity::delete_by_id(goal_id).exec(&db_tx).await?;
            Ok(())
        })
    }
}
