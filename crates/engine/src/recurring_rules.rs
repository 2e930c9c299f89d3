//! Recurring rules: a template transaction repeated weekly or monthly.
//!
//! The reporting core never reads these; they are stored for clients that
//! materialise the next occurrence.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        }
    }

    /// Largest valid `day` for this frequency (day of week or day of month).
    pub fn max_day(self) -> u32 {
        match self {
            Self::Weekly => 7,
            Self::Monthly => 31,
        }
    }
}

impl TryFrom<&str> for Frequency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            other => Err(EngineError::InvalidSchedule(format!(
                "invalid frequency: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub id: i64,
    pub user_id: String,
    pub transaction_template_id: i64,
    pub frequency: Frequency,
    pub day: u32,
    pub next_run: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recurring_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub transaction_template_id: i64,
    pub frequency: String,
    pub day: i32,
    pub next_run: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for RecurringRule {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let day = u32::try_from(model.day)
            .map_err(|_| EngineError::InvalidSchedule(format!("invalid day: {}", model.day)))?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            transaction_template_id: model.transaction_template_id,
            frequency: Frequency::try_from(model.frequency.as_str())?,
            day,
            next_run: model.next_run,
        })
    }
}
