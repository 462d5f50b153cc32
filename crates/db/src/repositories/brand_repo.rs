//! Repository for the `brands` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::brand::Brand;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for brands.
pub struct BrandRepo;

impl BrandRepo {
    /// List all brands, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }

    /// Find a brand by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new brand. Fails with a unique violation on a duplicate name.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Brand, sqlx::Error> {
        let query = format!("INSERT INTO brands (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Brand>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Rename a brand. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("UPDATE brands SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a brand. Returns `true` if a row was removed.
    ///
    /// Listings that used the brand keep their SKU with `brand_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
