//! Repository for the `country_controls` overlay.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::country_control::CountryControl;

/// Reads and writes the per-country "controlled" flag.
pub struct CountryControlRepo;

impl CountryControlRepo {
    /// Every country with its flag; countries without a control row report `false`.
    pub async fn list(pool: &PgPool) -> Result<Vec<CountryControl>, sqlx::Error> {
        sqlx::query_as::<_, CountryControl>(
            "SELECT c.id, c.name, COALESCE(cc.is_controlled, false) AS is_controlled \
             FROM countries c \
             LEFT JOIN country_controls cc ON cc.country_id = c.id \
             ORDER BY c.name, c.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Set the flag for one country, creating the control row on first use.
    ///
    /// Fails with a foreign key violation when the country does not exist.
    pub async fn upsert(
        pool: &PgPool,
        country_id: DbId,
        is_controlled: bool,
    ) -> Result<CountryControl, sqlx::Error> {
        sqlx::query_as::<_, CountryControl>(
            "WITH upserted AS ( \
                INSERT INTO country_controls (country_id, is_controlled) \
                VALUES ($1, $2) \
                ON CONFLICT (country_id) DO UPDATE SET is_controlled = EXCLUDED.is_controlled \
                RETURNING country_id, is_controlled \
             ) \
             SELECT c.id, c.name, u.is_controlled \
             FROM upserted u \
             JOIN countries c ON c.id = u.country_id",
        )
        .bind(country_id)
        .bind(is_controlled)
        .fetch_one(pool)
        .await
    }
}
