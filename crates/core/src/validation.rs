//! Field-level checks applied before a row reaches the database.

use crate::error::CoreError;

/// Reject blank names. Returns the trimmed value.
pub fn require_name(entity: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{entity} name is required")));
    }
    Ok(trimmed.to_string())
}

/// Like [`require_name`] for patch payloads where the name may be absent.
pub fn require_name_if_present(
    entity: &str,
    name: Option<&str>,
) -> Result<Option<String>, CoreError> {
    name.map(|n| require_name(entity, n)).transpose()
}

/// Collapse blank optional text to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Normalise an email address for lookups (trim + lowercase).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
