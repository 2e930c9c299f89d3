//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Forbidden`] thrown when a write references a record owned by someone
//!   else.
//! - [`KeyNotFound`] thrown when an item is not found for the requesting
//!   owner.
//! - [`ExistingKey`] thrown when a unique record already exists.
//! - validation errors ([`InvalidAmount`], [`InvalidName`], [`InvalidDate`],
//!   [`InvalidCategory`], [`InvalidKind`], [`InvalidSchedule`]) thrown on
//!   malformed writes or unreadable stored values.
//! - [`Export`] thrown when the CSV export cannot be rendered.
//!
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidName`]: EngineError::InvalidName
//!  [`InvalidDate`]: EngineError::InvalidDate
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`InvalidKind`]: EngineError::InvalidKind
//!  [`InvalidSchedule`]: EngineError::InvalidSchedule
//!  [`Export`]: EngineError::Export
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid kind: {0}")]
    InvalidKind(String),
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("Export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Returns `true` for errors caused by a malformed write payload.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidName(_)
                | Self::InvalidDate(_)
                | Self::InvalidCategory(_)
                | Self::InvalidKind(_)
                | Self::InvalidSchedule(_)
        )
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidKind(a), Self::InvalidKind(b)) => a == b,
            (Self::InvalidSchedule(a), Self::InvalidSchedule(b)) => a == b,
            (Self::Export(a), Self::Export(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
