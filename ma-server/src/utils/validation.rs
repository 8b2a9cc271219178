//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the CRUD
//! handlers. The nested workorder payload has its own aggregate guard in
//! `api::workorders::validate`.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: config, technician, status, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Workorder titles
pub const MAX_TITLE_LEN: usize = 200;

/// Item detail, comments
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, status names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / attachment paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

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
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_required_text() {
        assert!(validate_required_text("  ", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text("Leak", "title", MAX_TITLE_LEN).is_ok());
    }

    #[test]
    fn optional_text_only_checks_length() {
        assert!(validate_optional_text(&None, "comment", 5).is_ok());
        assert!(validate_optional_text(&Some("ok".into()), "comment", 5).is_ok());
        assert!(validate_optional_text(&Some("too long".into()), "comment", 5).is_err());
    }
}
