//! Repository for the `countries` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::country::Country;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for countries.
pub struct CountryRepo;

impl CountryRepo {
    /// List all countries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Country>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM countries ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Country>(&query).fetch_all(pool).await
    }

    /// Find a country by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Country>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM countries WHERE id = $1");
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new country. Fails with a unique violation on a duplicate name.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Country, sqlx::Error> {
        let query = format!("INSERT INTO countries (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Country>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Rename a country. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Country>, sqlx::Error> {
        let query = format!("UPDATE countries SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Country>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a country. Returns `true` if a row was removed.
    ///
    /// The country's listings and its control flag go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM countries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
