//! Currency code and rate value rules.
//!
//! Rates are expressed as foreign units per one unit of the default currency,
//! so a rate is always strictly positive and the default currency has none.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Length of an ISO-4217 style currency code.
pub const CURRENCY_CODE_LENGTH: usize = 3;

/// Trim and upper-case a currency code, rejecting anything but three letters.
pub fn normalize_currency_code(code: &str) -> Result<String, CoreError> {
    let trimmed = code.trim();
    if trimmed.chars().count() != CURRENCY_CODE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Currency code must be exactly {CURRENCY_CODE_LENGTH} characters, got '{trimmed}'"
        )));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::Validation(format!(
            "Currency code must contain only letters, got '{trimmed}'"
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Maximum fractional digits stored for a rate (`NUMERIC(18,6)`).
pub const RATE_SCALE: u32 = 6;

/// Exclusive upper bound on a rate: twelve integer digits.
const RATE_LIMIT: i64 = 1_000_000_000_000;

/// A rate must be strictly positive and fit the stored precision exactly.
pub fn validate_rate_value(rate: Decimal) -> Result<(), CoreError> {
    if rate <= Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "Rate value must be greater than zero, got {rate}"
        )));
    }
    if rate.normalize().scale() > RATE_SCALE {
        return Err(CoreError::Validation(format!(
            "Rate value allows at most {RATE_SCALE} decimal places, got {rate}"
        )));
    }
    if rate >= Decimal::from(RATE_LIMIT) {
        return Err(CoreError::Validation(format!(
            "Rate value must be less than {RATE_LIMIT}, got {rate}"
        )));
    }
    Ok(())
}
