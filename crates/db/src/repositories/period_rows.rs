//! Batch helpers for the two period tables.
//!
//! Template periods and listing periods share one row shape and differ only
//! in the table and owner column, so both are written and read through here.

use std::collections::HashMap;

use catalog_core::seasonality::DayRange;
use catalog_core::types::DbId;
use rust_decimal::Decimal;

use crate::models::period::PeriodRow;

/// A period table and the column pointing at its owner.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PeriodTable {
    pub table: &'static str,
    pub owner_column: &'static str,
}

pub(crate) const TEMPLATE_PERIODS: PeriodTable = PeriodTable {
    table: "seasonality_template_periods",
    owner_column: "template_id",
};

pub(crate) const LISTING_PERIODS: PeriodTable = PeriodTable {
    table: "nomenclature_listing_periods",
    owner_column: "listing_id",
};

/// Insert `periods` for one owner with a single UNNEST statement.
pub(crate) async fn insert_periods(
    conn: &mut sqlx::PgConnection,
    target: PeriodTable,
    owner_id: DbId,
    periods: &[DayRange],
) -> Result<(), sqlx::Error> {
    if periods.is_empty() {
        return Ok(());
    }

    let starts: Vec<i32> = periods.iter().map(|p| p.start_day_of_year).collect();
    let ends: Vec<i32> = periods.iter().map(|p| p.end_day_of_year).collect();
    let markups: Vec<Option<Decimal>> = periods.iter().map(|p| p.markup_percentage).collect();
    let tolerances: Vec<Option<Decimal>> =
        periods.iter().map(|p| p.tolerance_percentage).collect();

    let query = format!(
        "INSERT INTO {table} \
            ({owner}, start_day_of_year, end_day_of_year, markup_percentage, tolerance_percentage) \
         SELECT $1::bigint, * FROM UNNEST($2::int[], $3::int[], $4::numeric[], $5::numeric[])",
        table = target.table,
        owner = target.owner_column,
    );
    sqlx::query(&query)
        .bind(owner_id)
        .bind(&starts)
        .bind(&ends)
        .bind(&markups)
        .bind(&tolerances)
        .execute(conn)
        .await?;
    Ok(())
}

/// Delete every period belonging to one owner.
pub(crate) async fn delete_periods(
    conn: &mut sqlx::PgConnection,
    target: PeriodTable,
    owner_id: DbId,
) -> Result<(), sqlx::Error> {
    let query = format!(
        "DELETE FROM {table} WHERE {owner} = $1",
        table = target.table,
        owner = target.owner_column,
    );
    sqlx::query(&query).bind(owner_id).execute(conn).await?;
    Ok(())
}

/// Load the periods of many owners at once, grouped by owner id.
///
/// Within an owner, periods keep insertion order.
pub(crate) async fn load_periods<'e, E>(
    executor: E,
    target: PeriodTable,
    owner_ids: &[DbId],
) -> Result<HashMap<DbId, Vec<DayRange>>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    let mut grouped: HashMap<DbId, Vec<DayRange>> = HashMap::new();
    if owner_ids.is_empty() {
        return Ok(grouped);
    }

    let query = format!(
        "SELECT {owner} AS owner_id, start_day_of_year, end_day_of_year, \
                markup_percentage, tolerance_percentage \
         FROM {table} \
         WHERE {owner} = ANY($1) \
         ORDER BY {owner}, id",
        table = target.table,
        owner = target.owner_column,
    );
    let rows = sqlx::query_as::<_, PeriodRow>(&query)
        .bind(owner_ids)
        .fetch_all(executor)
        .await?;
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(row.into());
    }
    Ok(grouped)
}
