//! Year-independent day-of-year calendar.
//!
//! Seasonality windows recur every year, so they are stored as integers in
//! `1..=366` over a fixed calendar in which February always has 29 days.
//! A given (month, day) therefore maps to the same number in leap and
//! non-leap years, and templates never need to know which year they apply to.

use crate::error::CoreError;

/// Days per month, February fixed at 29.
pub const MONTH_LENGTHS: [u16; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of days in the fixed calendar.
pub const DAYS_IN_YEAR: u16 = 366;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Convert a 1-based (month, day) pair to its day of year.
///
/// ```
/// use catalog_core::day_of_year::day_of_year;
///
/// assert_eq!(day_of_year(1, 1).unwrap(), 1);
/// assert_eq!(day_of_year(3, 1).unwrap(), 61);
/// assert_eq!(day_of_year(12, 31).unwrap(), 366);
/// ```
pub fn day_of_year(month: u8, day: u8) -> Result<u16, CoreError> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::Validation(format!(
            "Month must be between 1 and 12, got {month}"
        )));
    }
    let idx = usize::from(month - 1);
    let length = MONTH_LENGTHS[idx];
    if day == 0 || u16::from(day) > length {
        return Err(CoreError::Validation(format!(
            "Day must be between 1 and {length} for {}, got {day}",
            MONTH_NAMES[idx]
        )));
    }
    let preceding: u16 = MONTH_LENGTHS[..idx].iter().sum();
    Ok(preceding + u16::from(day))
}

/// Inverse of [`day_of_year`]: find the (month, day) owning `doy`.
pub fn month_day_from_day_of_year(doy: u16) -> Result<(u8, u8), CoreError> {
    if doy == 0 || doy > DAYS_IN_YEAR {
        return Err(CoreError::Validation(format!(
            "Day of year must be between 1 and {DAYS_IN_YEAR}, got {doy}"
        )));
    }

    let mut remaining = doy;
    for (idx, &length) in MONTH_LENGTHS.iter().enumerate() {
        if remaining <= length {
            // Both values are bounded by 12 and 31 respectively.
            return Ok((idx as u8 + 1, remaining as u8));
        }
        remaining -= length;
    }
    unreachable!("doy <= DAYS_IN_YEAR always lands in a month")
}

/// Render a day of year as a short label such as `"Mar 1"`.
///
/// Out-of-range values are rendered as `"day N"` so the helper can be used
/// inside error messages about invalid input.
pub fn format_day_of_year(doy: i32) -> String {
    match u16::try_from(doy)
        .ok()
        .and_then(|d| month_day_from_day_of_year(d).ok())
    {
        Some((month, day)) => format!("{} {day}", MONTH_NAMES[usize::from(month - 1)]),
        None => format!("day {doy}"),
    }
}
