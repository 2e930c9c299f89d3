use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};

use crate::{
    EngineError, ResultEngine, accounts, budgets, categories, goals, recurring_rules,
    transactions, users,
};

use super::Engine;

/// Generates the two lookups every owned entity needs:
///
/// - `$owned_fn` resolves a record the caller addresses directly. Records of
///   other owners are reported as missing.
/// - `$referenced_fn` resolves a record named inside a write payload. Records
///   of other owners are reported as forbidden.
macro_rules! impl_owned_lookup {
    ($owned_fn:ident, $referenced_fn:ident, $module:ident, $label:literal) => {
        impl_owned_lookup!($owned_fn, $module, $label);

        pub(super) async fn $referenced_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: &str,
            id: i64,
        ) -> ResultEngine<$module::Model> {
            let model = $module::Entity::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| {
                    EngineError::KeyNotFound(concat!($label, " not exists").to_string())
                })?;
            if model.user_id != user_id {
                return Err(EngineError::Forbidden(
                    concat!($label, " belongs to another owner").to_string(),
                ));
            }
            Ok(model)
        }
    };
    ($owned_fn:ident, $module:ident, $label:literal) => {
        pub(super) async fn $owned_fn(
            &self,
            db: &DatabaseTransaction,
            user_id: &str,
            id: i64,
        ) -> ResultEngine<$module::Model> {
            $module::Entity::find_by_id(id)
                .filter($module::Column::UserId.eq(user_id))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound(concat!($label, " not exists").to_string()))
        }
    };
}

impl Engine {
    impl_owned_lookup!(owned_account, referenced_account, accounts, "account");
    impl_owned_lookup!(owned_category, referenced_category, categories, "category");
    impl_owned_lookup!(
        owned_transaction,
        referenced_transaction,
        transactions,
        "transaction"
    );
    impl_owned_lookup!(owned_budget, budgets, "budget");
    impl_owned_lookup!(owned_goal, goals, "goal");
    impl_owned_lookup!(owned_recurring_rule, recurring_rules, "recurring_rule");

    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }
}
