//! Row shape shared by template periods and listing periods.

use catalog_core::seasonality::DayRange;
use catalog_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// A period row tagged with the id of its owner (template or listing).
#[derive(Debug, Clone, FromRow)]
pub struct PeriodRow {
    pub owner_id: DbId,
    pub start_day_of_year: i32,
    pub end_day_of_year: i32,
    pub markup_percentage: Option<Decimal>,
    pub tolerance_percentage: Option<Decimal>,
}

impl From<PeriodRow> for DayRange {
    fn from(row: PeriodRow) -> Self {
        DayRange {
            start_day_of_year: row.start_day_of_year,
            end_day_of_year: row.end_day_of_year,
            markup_percentage: row.markup_percentage,
            tolerance_percentage: row.tolerance_percentage,
        }
    }
}
