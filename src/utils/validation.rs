//! Input validation helpers
//!
//! Centralized text length constants and validation functions, run by every
//! mutating handler before the repository is touched. Validation failures
//! surface as 400 envelopes and the repository call never happens.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: category, brand
pub const MAX_NAME_LEN: usize = 200;

/// Product titles, banner titles
pub const MAX_TITLE_LEN: usize = 200;

/// Product descriptions
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// URLs / image paths / links
pub const MAX_URL_LEN: usize = 2048;

/// Usernames
pub const MAX_USERNAME_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ───────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Parse a required price field. Must be a number and >= 0.
pub fn parse_required_price(value: Option<&str>, field: &str) -> Result<f64, AppError> {
    let raw = value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation(format!("{field} is required")))?;
    parse_price(raw, field)
}

/// Parse an optional price field. Empty strings count as absent.
pub fn parse_optional_price(value: Option<&str>, field: &str) -> Result<Option<f64>, AppError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_price(raw, field).map(Some),
        _ => Ok(None),
    }
}

fn parse_price(raw: &str, field: &str) -> Result<f64, AppError> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be a number")))?;
    if price < 0.0 || !price.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(price)
}

/// Parse a boolean flag. Absent or empty means `false`.
pub fn parse_flag(value: Option<&str>, field: &str) -> Result<bool, AppError> {
    match value {
        None => Ok(false),
        Some(raw) if raw.trim().is_empty() => Ok(false),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(AppError::validation(format!("{field} must be a boolean"))),
        },
    }
}
