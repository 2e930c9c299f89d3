use std::collections::HashSet;

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use tracing::info;

use crate::{
    Category, CategoryCmd, EngineError, ResultEngine, budgets, categories, transactions,
    util::normalize_name,
};

use super::{Engine, with_tx};

impl Engine {
    /// Walk up from `parent_id` and fail if the chain reaches `category_id`.
    async fn ensure_acyclic(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        category_id: i64,
        parent_id: i64,
    ) -> ResultEngine<()> {
        let cycle = || EngineError::InvalidCategory("category parent would form a cycle".to_string());
        let mut seen = HashSet::from([category_id]);
        let mut cursor = Some(parent_id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                return Err(cycle());
            }
            cursor = self
                .referenced_category(db_tx, user_id, current)
                .await?
                .parent_id;
        }
        Ok(())
    }

    /// Add a new category, optionally below an existing one of the same owner.
    pub async fn create_category(
        &self,
        user_id: &str,
        cmd: CategoryCmd,
    ) -> ResultEngine<Category> {
        let name = normalize_name(&cmd.name, "category")?;
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            if let Some(parent_id) = cmd.parent_id {
                self.referenced_category(&db_tx, user_id, parent_id).await?;
            }
            let model = categories::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(user_id.to_string()),
                name: ActiveValue::Set(name),
                category_type: ActiveValue::Set(cmd.category_type.as_str().to_string()),
                parent_id: ActiveValue::Set(cmd.parent_id),
            }
            .insert(&db_tx)
            .await?;
            info!(user_id, category_id = model.id, "category created");
            Category::try_from(model)
        })
    }

    pub async fn list_categories(&self, user_id: &str) -> ResultEngine<Vec<Category>> {
        with_tx!(self, |db_tx| {
            categories::Entity::find()
                .filter(categories::Column::UserId.eq(user_id))
                .order_by_asc(categories::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Category::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    pub async fn category(&self, user_id: &str, category_id: i64) -> ResultEngine<Category> {
        with_tx!(self, |db_tx| {
            let model = self.owned_category(&db_tx, user_id, category_id).await?;
            Category::try_from(model)
        })
    }

    /// Replace the editable fields of a category.
    ///
    /// A parent that is the category itself, or one of its descendants, is
    /// rejected.
    pub async fn update_category(
        &self,
        user_id: &str,
        category_id: i64,
        cmd: CategoryCmd,
    ) -> ResultEngine<Category> {
        let name = normalize_name(&cmd.name, "category")?;
        with_tx!(self, |db_tx| {
            self.owned_category(&db_tx, user_id, category_id).await?;
            if let Some(parent_id) = cmd.parent_id {
                self.ensure_acyclic(&db_tx, user_id, category_id, parent_id)
                    .await?;
            }
            let model = categories::ActiveModel {
                id: ActiveValue::Unchanged(category_id),
                name: ActiveValue::Set(name),
                category_type: ActiveValue::Set(cmd.category_type.as_str().to_string()),
                parent_id: ActiveValue::Set(cmd.parent_id),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Category::try_from(model)
        })
    }

    /// Delete a category.
    ///
    /// Transactions and child categories lose the reference; budgets of the
    /// category are removed.
    pub async fn delete_category(&self, user_id: &str, category_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.owned_category(&db_tx, user_id, category_id).await?;
            transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::CategoryId,
                    Expr::value(Option::<i64>::None),
                )
                .filter(transactions::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?;
            categories::Entity::update_many()
                .col_expr(categories::Column::ParentId, Expr::value(Option::<i64>::None))
                .filter(categories::Column::ParentId.eq(category_id))
                .exec(&db_tx)
                .await?;
            budgets::Entity::delete_many()
                .filter(budgets::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?;
            categories::Entity::delete_by_id(category_id)
                .exec(&db_tx)
                .await?;
            info!(user_id, category_id, "category deleted");
            Ok(())
        })
    }
}
