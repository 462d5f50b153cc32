//! Repository for the `currency_rates` table.

use catalog_core::types::DbId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::currency_rate::{CurrencyRate, CurrencyRateFilter, RateCreate};

/// Rate columns joined with the owning currency.
const JOINED_COLUMNS: &str = "r.id, r.currency_id, c.name AS currency_name, \
    c.code AS currency_code, r.rate_date, r.rate_value, r.created_at, r.updated_at";

/// Provides CRUD operations for currency rates.
pub struct CurrencyRateRepo;

impl CurrencyRateRepo {
    /// List rates, newest date first, optionally for a single currency.
    pub async fn list(
        pool: &PgPool,
        filter: &CurrencyRateFilter,
    ) -> Result<Vec<CurrencyRate>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM currency_rates r \
             JOIN currencies c ON c.id = r.currency_id \
             WHERE ($1::bigint IS NULL OR r.currency_id = $1) \
             ORDER BY r.rate_date DESC, c.code"
        );
        sqlx::query_as::<_, CurrencyRate>(&query)
            .bind(filter.currency_id)
            .fetch_all(pool)
            .await
    }

    /// Find a rate by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CurrencyRate>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM currency_rates r \
             JOIN currencies c ON c.id = r.currency_id \
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, CurrencyRate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a rate for a non-default currency. A second rate for the same
    /// currency and date is a unique violation.
    ///
    /// The currency row stays locked until commit so it cannot become the
    /// default while the rate is being added.
    pub async fn create(
        pool: &PgPool,
        currency_id: DbId,
        rate_date: NaiveDate,
        rate_value: Decimal,
    ) -> Result<RateCreate, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let currency: Option<(String, bool)> =
            sqlx::query_as("SELECT code, is_default FROM currencies WHERE id = $1 FOR UPDATE")
                .bind(currency_id)
                .fetch_optional(&mut *tx)
                .await?;
        match currency {
            None => return Ok(RateCreate::CurrencyNotFound),
            Some((code, true)) => {
                tracing::debug!(currency_id, "Rate refused for default currency");
                return Ok(RateCreate::DefaultCurrency { code });
            }
            Some((_, false)) => {}
        }

        let query = format!(
            "WITH r AS ( \
                INSERT INTO currency_rates (currency_id, rate_date, rate_value) \
                VALUES ($1, $2, $3) \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM r JOIN currencies c ON c.id = r.currency_id"
        );
        let rate = sqlx::query_as::<_, CurrencyRate>(&query)
            .bind(currency_id)
            .bind(rate_date)
            .bind(rate_value)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(RateCreate::Created(rate))
    }

    /// Update the date and/or value of a rate. `None` fields keep their value.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        rate_date: Option<NaiveDate>,
        rate_value: Option<Decimal>,
    ) -> Result<Option<CurrencyRate>, sqlx::Error> {
        let query = format!(
            "WITH r AS ( \
                UPDATE currency_rates SET \
                    rate_date = COALESCE($2, rate_date), \
                    rate_value = COALESCE($3, rate_value) \
                WHERE id = $1 \
                RETURNING * \
             ) \
             SELECT {JOINED_COLUMNS} FROM r JOIN currencies c ON c.id = r.currency_id"
        );
        sqlx::query_as::<_, CurrencyRate>(&query)
            .bind(id)
            .bind(rate_date)
            .bind(rate_value)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rate. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM currency_rates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
