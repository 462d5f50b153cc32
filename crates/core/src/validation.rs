//! Shared input validators for named reference records.

use crate::error::CoreError;

/// Maximum allowed length for a display name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Validate a display name: non-empty after trimming and within
/// [`MAX_NAME_LENGTH`]. Returns the trimmed name.
pub fn validate_name<'a>(entity: &str, name: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{entity} name is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{entity} name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}
