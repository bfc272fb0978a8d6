//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the
//! checkout surface. Limits are UX-driven; the store has no built-in
//! length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Item and customer names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Short identifiers: phone, postal code
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Street addresses and city names
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate a required email field (presence + shape, not deliverability).
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !valid {
        return Err(AppError::validation(format!("{field} is not a valid email address")));
    }
    Ok(())
}
