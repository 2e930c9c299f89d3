use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use tracing::info;

use crate::{EngineError, RecurringRule, RecurringRuleCmd, ResultEngine, recurring_rules};

use super::{Engine, with_tx};

impl Engine {
    /// Store a recurring rule for one of the owner's transactions.
    ///
    /// `day` is a weekday (1..=7) for weekly rules and a day of month
    /// (1..=31) for monthly ones.
    pub async fn create_recurring_rule(
        &self,
        user_id: &str,
        cmd: RecurringRuleCmd,
    ) -> ResultEngine<RecurringRule> {
        let max_day = cmd.frequency.max_day();
        if !(1..=max_day).contains(&cmd.day) {
            return Err(EngineError::InvalidSchedule(format!(
                "day must be within 1..={max_day} for {} rules",
                cmd.frequency.as_str()
            )));
        }
        let day = i32::try_from(cmd.day)
            .map_err(|_| EngineError::InvalidSchedule(format!("invalid day: {}", cmd.day)))?;
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            self.referenced_transaction(&db_tx, user_id, cmd.transaction_template_id)
                .await?;
            let model = recurring_rules::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id.to_string()),
                transaction_template_id: ActiveValue::Set(cmd.transaction_template_id),
                frequency: ActiveValue::Set(cmd.frequency.as_str().to_string()),
                day: ActiveValue::Set(day),
                next_run: ActiveValue::Set(cmd.next_run),
            }
            .insert(&db_tx)
            .await?;
            info!(user_id, rule_id = model.id, "recurring rule created");
            RecurringRule::try_from(model)
        })
    }

    pub async fn list_recurring_rules(&self, user_id: &str) -> ResultEngine<Vec<RecurringRule>> {
        with_tx!(self, |db_tx| {
            recurring_rules::Entity::find()
                .filter(recurring_rules::Column::UserId.eq(user_id))
                .order_by_asc(recurring_rules::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(RecurringRule::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    pub async fn recurring_rule(&self, user_id: &str, rule_id: i64) -> ResultEngine<RecurringRule> {
        with_tx!(self, |db_tx| {
            let model = self
                .owned_recurring_rule(&db_tx, user_id, rule_id)
                .await?;
            RecurringRule::try_from(model)
        })
    }

    pub async fn delete_recurring_rule(&self, user_id: &str, rule_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.owned_recurring_rule(&db_tx, user_id, rule_id)
                .await?;
            recurring_rules::Entity::delete_by_id(rule_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
