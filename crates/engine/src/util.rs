//! Internal helpers for write validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every store operation enforces the same invariants.

use crate::{EngineError, MoneyCents, ResultEngine};

pub(crate) const MAX_NAME_CHARS: usize = 80;
pub(crate) const MAX_NOTE_CHARS: usize = 200;

/// Trim a display name and check it is non-empty and short enough.
pub(crate) fn normalize_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} name must not be empty"
        )));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(EngineError::InvalidName(format!(
            "{label} name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional note; an absent note is stored as the empty string.
pub(crate) fn normalize_note(value: Option<&str>) -> ResultEngine<String> {
    let note = value.map(str::trim).unwrap_or_default();
    if note.chars().count() > MAX_NOTE_CHARS {
        return Err(EngineError::InvalidName(format!(
            "note must be at most {MAX_NOTE_CHARS} characters"
        )));
    }
    Ok(note.to_string())
}

/// Transaction amounts are strictly positive; the kind carries the sign.
pub(crate) fn validate_transaction_amount(amount: MoneyCents) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(
            "amount must be > 0".to_string(),
        ));
    }
    validate_storable(amount, "amount")
}

/// Planned and target amounts may be zero but never negative.
pub(crate) fn validate_non_negative(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(EngineError::InvalidAmount(format!("{label} must be >= 0")));
    }
    validate_storable(amount, label)
}

pub(crate) fn validate_storable(amount: MoneyCents, label: &str) -> ResultEngine<()> {
    if !amount.is_storable() {
        return Err(EngineError::InvalidAmount(format!(
            "{label} exceeds 12 digits"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(normalize_name("  Food ", "category").unwrap(), "Food");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            normalize_name("   ", "account"),
            Err(EngineError::InvalidName(_))
        ));
    }

    #[test]
    fn name_length_counts_chars_not_bytes() {
        let accented = "é".repeat(MAX_NAME_CHARS);
        assert!(normalize_name(&accented, "goal").is_ok());
        let too_long = "a".repeat(MAX_NAME_CHARS + 1);
        assert!(normalize_name(&too_long, "goal").is_err());
    }

    #[test]
    fn missing_note_becomes_empty() {
        assert_eq!(normalize_note(None).unwrap(), "");
        assert!(normalize_note(Some(&"x".repeat(MAX_NOTE_CHARS + 1))).is_err());
    }

    #[test]
    fn amount_rules() {
        assert!(validate_transaction_amount(MoneyCents::new(1)).is_ok());
        assert!(validate_transaction_amount(MoneyCents::ZERO).is_err());
        assert!(validate_non_negative(MoneyCents::ZERO, "planned").is_ok());
        assert!(validate_non_negative(MoneyCents::new(-1), "planned").is_err());
        assert!(validate_storable(MoneyCents::new(1_000_000_000_000), "target").is_err());
    }
}
