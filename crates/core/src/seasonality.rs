//! Seasonality periods and the template-or-inline seasonality union.
//!
//! A period is an inclusive `[start, end]` day-of-year window (see
//! [`crate::day_of_year`]) optionally carrying a markup and a tolerance
//! percentage. Periods belong to exactly one owner (a template or a listing)
//! and must not overlap within that owner. Windows crossing New Year are not
//! special-cased and must be split into two periods.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::day_of_year::{format_day_of_year, DAYS_IN_YEAR};
use crate::error::CoreError;
use crate::types::DbId;

/// Maximum fractional digits accepted for percentages (`NUMERIC(5,2)`).
pub const PERCENTAGE_SCALE: u32 = 2;

/// Exclusive upper bound on the absolute value of a percentage.
const PERCENTAGE_LIMIT: i64 = 1000;

/// A recurring day-of-year window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRange {
    pub start_day_of_year: i32,
    pub end_day_of_year: i32,
    #[serde(default)]
    pub markup_percentage: Option<Decimal>,
    #[serde(default)]
    pub tolerance_percentage: Option<Decimal>,
}

impl DayRange {
    /// A plain window with no markup or tolerance.
    pub fn new(start_day_of_year: i32, end_day_of_year: i32) -> Self {
        Self {
            start_day_of_year,
            end_day_of_year,
            markup_percentage: None,
            tolerance_percentage: None,
        }
    }

    fn label(&self) -> String {
        format!(
            "{}..{}",
            format_day_of_year(self.start_day_of_year),
            format_day_of_year(self.end_day_of_year)
        )
    }
}

/// True when the two inclusive windows share at least one day.
pub fn periods_overlap(a: &DayRange, b: &DayRange) -> bool {
    a.start_day_of_year.max(b.start_day_of_year) <= a.end_day_of_year.min(b.end_day_of_year)
}

/// Validate a single period in isolation.
pub fn validate_period(period: &DayRange) -> Result<(), CoreError> {
    let max = i32::from(DAYS_IN_YEAR);
    for (field, value) in [
        ("startDayOfYear", period.start_day_of_year),
        ("endDayOfYear", period.end_day_of_year),
    ] {
        if !(1..=max).contains(&value) {
            return Err(CoreError::Validation(format!(
                "{field} must be between 1 and {max}, got {value}"
            )));
        }
    }
    if period.start_day_of_year > period.end_day_of_year {
        return Err(CoreError::Validation(format!(
            "Period {} ends before it starts; split windows crossing the year boundary \
             into two periods",
            period.label()
        )));
    }
    validate_percentage("markupPercentage", period.markup_percentage)?;
    validate_percentage("tolerancePercentage", period.tolerance_percentage)?;
    Ok(())
}

fn validate_percentage(field: &str, value: Option<Decimal>) -> Result<(), CoreError> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.normalize().scale() > PERCENTAGE_SCALE {
        return Err(CoreError::Validation(format!(
            "{field} allows at most {PERCENTAGE_SCALE} decimal places, got {value}"
        )));
    }
    if value.abs() >= Decimal::from(PERCENTAGE_LIMIT) {
        return Err(CoreError::Validation(format!(
            "{field} must be less than {PERCENTAGE_LIMIT} in magnitude, got {value}"
        )));
    }
    Ok(())
}

/// Validate the full period set of one owner.
///
/// The set must be non-empty, every period must be valid, and no two periods
/// may overlap.
pub fn validate_periods(periods: &[DayRange]) -> Result<(), CoreError> {
    if periods.is_empty() {
        return Err(CoreError::Validation(
            "At least one period is required".to_string(),
        ));
    }
    for period in periods {
        validate_period(period)?;
    }

    let mut sorted: Vec<&DayRange> = periods.iter().collect();
    sorted.sort_by_key(|p| (p.start_day_of_year, p.end_day_of_year));
    for pair in sorted.windows(2) {
        if periods_overlap(pair[0], pair[1]) {
            return Err(CoreError::Validation(format!(
                "Periods {} and {} overlap",
                pair[0].label(),
                pair[1].label()
            )));
        }
    }
    Ok(())
}

/// Seasonality as submitted on the wire: `{ "template_id": .., "periods": [..] }`.
///
/// Matches the read shape, so a listing fetched with its template periods
/// filled in can be sent back unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonalityInput {
    #[serde(default)]
    pub template_id: Option<DbId>,
    #[serde(default)]
    pub periods: Vec<DayRange>,
}

/// Where a listing's periods come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seasonality {
    /// Periods are read live from the referenced template.
    Template(DbId),
    /// Periods are owned by the listing.
    Inline(Vec<DayRange>),
}

impl TryFrom<SeasonalityInput> for Seasonality {
    type Error = CoreError;

    fn try_from(input: SeasonalityInput) -> Result<Self, Self::Error> {
        // A template reference wins; any periods sent alongside it are the
        // template's own, echoed back from a read.
        match (input.template_id, input.periods.is_empty()) {
            (Some(id), _) => Ok(Seasonality::Template(id)),
            (None, false) => {
                validate_periods(&input.periods)?;
                Ok(Seasonality::Inline(input.periods))
            }
            (None, true) => Err(CoreError::Validation(
                "Seasonality must reference a template or list at least one period".to_string(),
            )),
        }
    }
}

impl Seasonality {
    pub fn template_id(&self) -> Option<DbId> {
        match self {
            Seasonality::Template(id) => Some(*id),
            Seasonality::Inline(_) => None,
        }
    }

    pub fn inline_periods(&self) -> &[DayRange] {
        match self {
            Seasonality::Template(_) => &[],
            Seasonality::Inline(periods) => periods,
        }
    }
}
