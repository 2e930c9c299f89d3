//! Personal finance ledger and reporting engine.
//!
//! The crate has two halves:
//!
//! - [`Engine`], an owner-scoped store over SQLite (accounts, categories,
//!   transactions, budgets, goals, recurring rules);
//! - pure report functions ([`report`], [`export`], [`Period`]) that fold the
//!   rows the store loads into dashboards and CSV.

pub use accounts::{Account, AccountKind};
pub use budgets::Budget;
pub use categories::{Category, CategoryType};
pub use commands::{
    AccountCmd, BudgetCmd, CategoryCmd, GoalCmd, RecurringRuleCmd, TransactionCmd,
};
pub use error::EngineError;
pub use export::{EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
pub use goals::Goal;
pub use money::{MAX_AMOUNT_CENTS, MoneyCents};
pub use ops::{Engine, EngineBuilder, SeedSummary, TransactionListFilter};
pub use period::{Period, parse_date};
pub use recurring_rules::{Frequency, RecurringRule};
pub use report::{BudgetLine, BudgetStatus, CategoryExpense, GoalProgress, Report, Totals};
pub use transactions::{Transaction, TransactionKind};

mod accounts;
mod budgets;
mod categories;
mod commands;
mod error;
pub mod export;
mod goals;
mod money;
mod ops;
mod period;
mod recurring_rules;
pub mod report;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
