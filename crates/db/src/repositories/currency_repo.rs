//! Repository for the `currencies` table.
//!
//! At most one currency is the default. Setting a new default clears the
//! flag on every other row in the same transaction; the partial unique index
//! `uq_currencies_single_default` backs this up.

use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::currency::{Currency, CurrencyUpdate};

const COLUMNS: &str = "id, name, code, is_default, created_at, updated_at";

/// Provides CRUD operations for currencies.
pub struct CurrencyRepo;

impl CurrencyRepo {
    /// List all currencies, the default first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Currency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM currencies ORDER BY is_default DESC, code");
        sqlx::query_as::<_, Currency>(&query).fetch_all(pool).await
    }

    /// Find a currency by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Currency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM currencies WHERE id = $1");
        sqlx::query_as::<_, Currency>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The current default currency, if one is set.
    pub async fn find_default(pool: &PgPool) -> Result<Option<Currency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM currencies WHERE is_default");
        sqlx::query_as::<_, Currency>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new currency. `code` must already be normalised.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        code: &str,
        is_default: bool,
    ) -> Result<Currency, sqlx::Error> {
        let mut tx = pool.begin().await?;
        if is_default {
            Self::clear_default(&mut tx, None).await?;
        }
        let query = format!(
            "INSERT INTO currencies (name, code, is_default) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let currency = sqlx::query_as::<_, Currency>(&query)
            .bind(name)
            .bind(code)
            .bind(is_default)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(currency)
    }

    /// Replace a currency's fields.
    ///
    /// The row is locked first, so a concurrent rate insert either lands
    /// before the rate check below or sees the new default and is refused.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        code: &str,
        is_default: bool,
    ) -> Result<CurrencyUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let locked: Option<(String, bool)> =
            sqlx::query_as("SELECT code, is_default FROM currencies WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((current_code, was_default)) = locked else {
            return Ok(CurrencyUpdate::NotFound);
        };
        if is_default && !was_default && Self::has_rates(&mut *tx, id).await? {
            tracing::debug!(currency_id = id, "Currency with rates cannot become default");
            return Ok(CurrencyUpdate::HasRates { code: current_code });
        }

        if is_default {
            Self::clear_default(&mut tx, Some(id)).await?;
        }
        let query = format!(
            "UPDATE currencies SET name = $2, code = $3, is_default = $4 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let currency = sqlx::query_as::<_, Currency>(&query)
            .bind(id)
            .bind(name)
            .bind(code)
            .bind(is_default)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(CurrencyUpdate::Updated(currency))
    }

    /// Whether any rate rows reference the currency.
    pub async fn has_rates<'e, E>(executor: E, id: DbId) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM currency_rates WHERE currency_id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Delete a currency together with its rates. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM currencies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_default(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        except: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        let cleared = sqlx::query(
            "UPDATE currencies SET is_default = false \
             WHERE is_default AND ($1::bigint IS NULL OR id <> $1)",
        )
        .bind(except)
        .execute(&mut **tx)
        .await?;
        if cleared.rows_affected() > 0 {
            tracing::debug!(new_default = ?except, "Previous default currency cleared");
        }
        Ok(())
    }
}
