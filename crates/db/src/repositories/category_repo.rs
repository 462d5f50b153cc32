//! Repository for the `categories` table.

use catalog_core::category_tree::check_reparent;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryUpdate};

const COLUMNS: &str = "id, name, parent_id, created_at, updated_at";

/// Provides CRUD operations for the category tree.
pub struct CategoryRepo;

impl CategoryRepo {
    /// All categories as a flat list ordered by name; the caller nests them.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name, id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Find a category by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a category. An unknown `parent_id` is a foreign key violation.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        parent_id: Option<DbId>,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, parent_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .bind(parent_id)
            .fetch_one(pool)
            .await
    }

    /// Rename and/or re-parent a category.
    ///
    /// The whole table's `(id, parent_id)` pairs are locked for the duration
    /// of the transaction so two concurrent moves cannot together form a
    /// cycle that neither would form alone.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        parent_id: Option<DbId>,
    ) -> Result<CategoryUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let edges: Vec<(DbId, Option<DbId>)> =
            sqlx::query_as("SELECT id, parent_id FROM categories FOR UPDATE")
                .fetch_all(&mut *tx)
                .await?;

        if !edges.iter().any(|&(edge_id, _)| edge_id == id) {
            return Ok(CategoryUpdate::NotFound);
        }
        if let Some(parent) = parent_id {
            if !edges.iter().any(|&(edge_id, _)| edge_id == parent) {
                return Ok(CategoryUpdate::ParentNotFound(parent));
            }
        }
        if let Err(err) = check_reparent(id, parent_id, &edges) {
            tracing::debug!(category_id = id, ?parent_id, "Re-parent rejected");
            return Ok(CategoryUpdate::Rejected(err));
        }

        let query = format!(
            "UPDATE categories SET name = $2, parent_id = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(name)
            .bind(parent_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CategoryUpdate::Updated(category))
    }

    /// Delete a category and, through the cascading foreign key, its whole
    /// subtree. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
