//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use chrono::NaiveDate;
use shared::pricing::{MAX_AMOUNT, MAX_ITEM_COUNT};

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: court, item, price, discount, person names
pub const MAX_NAME_LEN: usize = 200;

/// Reservation notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, bank account
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides and a dot in the domain
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let valid = value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        });
    if !valid {
        return Err(AppError::validation(format!("{field} is not a valid email"))
            .with_detail("field", field));
    }
    Ok(())
}

/// Amounts must be finite, not negative and at most [`MAX_AMOUNT`]
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!("{field} must be a non-negative amount"))
            .with_detail("field", field));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::new(ErrorCode::ValueOutOfRange)
            .with_detail("field", field)
            .with_detail("max", MAX_AMOUNT));
    }
    Ok(())
}

/// Item counts: 1..=[`MAX_ITEM_COUNT`]
pub fn validate_item_count(count: i64, field: &str) -> Result<(), AppError> {
    if !(1..=MAX_ITEM_COUNT).contains(&count) {
        return Err(AppError::new(ErrorCode::ValueOutOfRange)
            .with_detail("field", field)
            .with_detail("min", 1)
            .with_detail("max", MAX_ITEM_COUNT));
    }
    Ok(())
}

/// Employee birth dates: 1960-01-01 <= date < 2010-01-01
pub fn employee_birthdate_range() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(1960, 1, 1).unwrap_or_default(),
        NaiveDate::from_ymd_opt(2010, 1, 1).unwrap_or_default(),
    )
}
