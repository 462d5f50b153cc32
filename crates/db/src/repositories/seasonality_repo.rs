//! Repository for `seasonality_templates` and their periods.

use catalog_core::seasonality::DayRange;
use catalog_core::types::DbId;
use sqlx::PgPool;

use super::period_rows::{delete_periods, insert_periods, load_periods, TEMPLATE_PERIODS};
use crate::models::seasonality::{SeasonalityTemplate, TemplateWithPeriods};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for seasonality templates.
pub struct SeasonalityRepo;

impl SeasonalityRepo {
    /// List all templates with their periods, newest first.
    pub async fn list_with_periods(
        pool: &PgPool,
    ) -> Result<Vec<TemplateWithPeriods>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM seasonality_templates ORDER BY created_at DESC, id DESC"
        );
        let templates = sqlx::query_as::<_, SeasonalityTemplate>(&query)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = templates.iter().map(|t| t.id).collect();
        let mut periods = load_periods(pool, TEMPLATE_PERIODS, &ids).await?;
        Ok(templates
            .into_iter()
            .map(|template| TemplateWithPeriods {
                periods: periods.remove(&template.id).unwrap_or_default(),
                template,
            })
            .collect())
    }

    /// Find a template by ID, enriched with its periods.
    pub async fn find_with_periods(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TemplateWithPeriods>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seasonality_templates WHERE id = $1");
        let Some(template) = sqlx::query_as::<_, SeasonalityTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let periods = load_periods(pool, TEMPLATE_PERIODS, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(TemplateWithPeriods { template, periods }))
    }

    /// Whether a template with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM seasonality_templates WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert a template and its periods in one transaction.
    ///
    /// `periods` must already be validated.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        periods: &[DayRange],
    ) -> Result<TemplateWithPeriods, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query =
            format!("INSERT INTO seasonality_templates (name) VALUES ($1) RETURNING {COLUMNS}");
        let template = sqlx::query_as::<_, SeasonalityTemplate>(&query)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
        insert_periods(&mut *tx, TEMPLATE_PERIODS, template.id, periods).await?;

        tx.commit().await?;
        Ok(TemplateWithPeriods {
            template,
            periods: periods.to_vec(),
        })
    }

    /// Rename a template and replace its whole period set.
    ///
    /// Listings referencing the template see the new periods on their next
    /// read. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        periods: &[DayRange],
    ) -> Result<Option<TemplateWithPeriods>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE seasonality_templates SET name = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let Some(template) = sqlx::query_as::<_, SeasonalityTemplate>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        delete_periods(&mut *tx, TEMPLATE_PERIODS, id).await?;
        insert_periods(&mut *tx, TEMPLATE_PERIODS, id, periods).await?;

        tx.commit().await?;
        Ok(Some(TemplateWithPeriods {
            template,
            periods: periods.to_vec(),
        }))
    }

    /// Delete a template. Its periods are removed and every listing that
    /// referenced it is left without seasonality.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM seasonality_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
