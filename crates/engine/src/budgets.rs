//! Monthly budget lines: a planned spending cap for one category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub planned: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub category_id: i64,
    pub year: i32,
    pub month: i32,
    pub planned_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let month = u32::try_from(model.month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| EngineError::InvalidDate(format!("invalid month: {}", model.month)))?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            category_id: model.category_id,
            year: model.year,
            month,
            planned: MoneyCents::new(model.planned_minor),
        })
    }
}
