//! Request and response bodies of the HTTP API.
//!
//! Money always travels as a decimal string with two decimals (`"1000.00"`);
//! requests also accept one or no decimals and `,` as separator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum AccountKind {
        Wallet,
        Bank,
        Card,
    }

    /// Body of `POST /accounts` and `PUT /accounts/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub name: String,
        pub kind: AccountKind,
        /// Defaults to `"0.00"`.
        pub opening_balance: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: i64,
        pub user: String,
        pub name: String,
        pub kind: AccountKind,
        pub opening_balance: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum CategoryType {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
        #[serde(rename = "type")]
        pub category_type: CategoryType,
        pub parent: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i64,
        pub user: String,
        pub name: String,
        #[serde(rename = "type")]
        pub category_type: CategoryType,
        pub parent: Option<i64>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum TransactionKind {
        Income,
        Expense,
        Transfer,
    }

    /// Query string of `GET /transactions` and `GET /transactions/export`.
    ///
    /// Every field is kept raw: blank values and values that do not parse
    /// are ignored rather than rejected.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionQuery {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub kind: Option<String>,
        pub account_id: Option<String>,
        pub category_id: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub account: i64,
        pub category: Option<i64>,
        pub kind: TransactionKind,
        /// Strictly positive; `kind` carries the direction.
        pub amount: String,
        pub date: NaiveDate,
        pub note: Option<String>,
        #[serde(default)]
        pub is_recurring: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        pub user: String,
        pub account: i64,
        pub category: Option<i64>,
        pub kind: TransactionKind,
        pub amount: String,
        pub date: NaiveDate,
        pub note: String,
        pub is_recurring: bool,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetNew {
        pub category: i64,
        pub year: i32,
        /// `1..=12`.
        pub month: u32,
        pub planned: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: i64,
        pub user: String,
        pub category: i64,
        pub year: i32,
        pub month: u32,
        pub planned: String,
    }
}

pub mod goal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalNew {
        pub name: String,
        pub target_amount: String,
        pub due_date: Option<NaiveDate>,
        pub account: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalView {
        pub id: i64,
        pub user: String,
        pub name: String,
        pub target_amount: String,
        pub due_date: Option<NaiveDate>,
        pub account: Option<i64>,
    }
}

pub mod recurring {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum Frequency {
        Weekly,
        Monthly,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringRuleNew {
        pub transaction_template: i64,
        pub frequency: Frequency,
        /// Day of week (`1..=7`) or day of month (`1..=31`).
        pub day: u32,
        pub next_run: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringRuleView {
        pub id: i64,
        pub user: String,
        pub transaction_template: i64,
        pub frequency: Frequency,
        pub day: u32,
        pub next_run: NaiveDate,
    }
}

pub mod dashboard {
    use super::*;

    /// Query string of `GET /dashboard`. Missing or malformed dates fall back
    /// to the current month.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DashboardQuery {
        pub start_date: Option<String>,
        pub end_date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PeriodView {
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TotalsView {
        pub income: String,
        pub expense: String,
        pub balance: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryExpenseView {
        pub category_id: Option<i64>,
        pub category: Option<String>,
        pub total: String,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum BudgetStatus {
        Ok,
        Over,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetLineView {
        pub category: String,
        pub planned: String,
        pub spent: String,
        pub remaining: String,
        pub status: BudgetStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GoalProgressView {
        pub goal: String,
        pub target_amount: String,
        pub due_date: Option<NaiveDate>,
        /// Absent when the goal is not linked to an account.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub account: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub estimated_balance: Option<String>,
        pub progress_percent: u8,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Dashboard {
        pub period: PeriodView,
        pub totals: TotalsView,
        pub by_category_expense: Vec<CategoryExpenseView>,
        pub budgets: Vec<BudgetLineView>,
        pub goals: Vec<GoalProgressView>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_type_uses_type_key() {
        let body: category::CategoryNew =
            serde_json::from_str(r#"{"name":"Food","type":"EXPENSE","parent":null}"#).unwrap();
        assert_eq!(body.category_type, category::CategoryType::Expense);
    }

    #[test]
    fn goal_without_account_omits_balance() {
        let view = dashboard::GoalProgressView {
            goal: "Trip".to_string(),
            target_amount: "0.00".to_string(),
            due_date: None,
            account: None,
            estimated_balance: None,
            progress_percent: 0,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("account").is_none());
        assert!(json.get("estimated_balance").is_none());
        assert_eq!(json["due_date"], serde_json::Value::Null);
    }

    #[test]
    fn recurring_flag_defaults_to_false() {
        let body: transaction::TransactionNew = serde_json::from_str(
            r#"{"account":1,"category":null,"kind":"EXPENSE","amount":"4.50","date":"2024-01-02","note":null}"#,
        )
        .unwrap();
        assert!(!body.is_recurring);
        assert_eq!(body.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
