//! Command structs for engine write operations.
//!
//! Each command carries the full editable state of one entity. The same
//! struct is used for create and for update (full replacement), keeping call
//! sites readable and avoiding long argument lists.

use chrono::NaiveDate;

use crate::{AccountKind, CategoryType, Frequency, MoneyCents, TransactionKind};

/// Create or replace an account.
#[derive(Clone, Debug)]
pub struct AccountCmd {
    pub name: String,
    pub kind: AccountKind,
    pub opening_balance: MoneyCents,
}

impl AccountCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            name: name.into(),
            kind,
            opening_balance: MoneyCents::ZERO,
        }
    }

    #[must_use]
    pub fn opening_balance(mut self, amount: MoneyCents) -> Self {
        self.opening_balance = amount;
        self
    }
}

/// Create or replace a category.
#[derive(Clone, Debug)]
pub struct CategoryCmd {
    pub name: String,
    pub category_type: CategoryType,
    pub parent_id: Option<i64>,
}

impl CategoryCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, category_type: CategoryType) -> Self {
        Self {
            name: name.into(),
            category_type,
            parent_id: None,
        }
    }

    #[must_use]
    pub fn parent_id(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Create or replace a transaction.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub note: Option<String>,
    pub is_recurring: bool,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(
        account_id: i64,
        kind: TransactionKind,
        amount: MoneyCents,
        date: NaiveDate,
    ) -> Self {
        Self {
            account_id,
            category_id: None,
            kind,
            amount,
            date,
            note: None,
            is_recurring: false,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn recurring(mut self, is_recurring: bool) -> Self {
        self.is_recurring = is_recurring;
        self
    }
}

/// Create or replace a monthly budget line.
#[derive(Clone, Debug)]
pub struct BudgetCmd {
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub planned: MoneyCents,
}

impl BudgetCmd {
    #[must_use]
    pub fn new(category_id: i64, year: i32, month: u32, planned: MoneyCents) -> Self {
        Self {
            category_id,
            year,
            month,
            planned,
        }
    }
}

/// Create or replace a savings goal.
#[derive(Clone, Debug)]
pub struct GoalCmd {
    pub name: String,
    pub target_amount: MoneyCents,
    pub due_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

impl GoalCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, target_amount: MoneyCents) -> Self {
        Self {
            name: name.into(),
            target_amount,
            due_date: None,
            account_id: None,
        }
    }

    #[must_use]
    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn account_id(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }
}

/// Create a recurring rule from a template transaction.
#[derive(Clone, Debug)]
pub struct RecurringRuleCmd {
    pub transaction_template_id: i64,
    pub frequency: Frequency,
    pub day: u32,
    pub next_run: NaiveDate,
}

impl RecurringRuleCmd {
    #[must_use]
    pub fn new(
        transaction_template_id: i64,
        frequency: Frequency,
        day: u32,
        next_run: NaiveDate,
    ) -> Self {
        Self {
            transaction_template_id,
            frequency,
            day,
            next_run,
        }
    }
}
