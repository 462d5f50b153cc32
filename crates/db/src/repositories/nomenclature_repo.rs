//! Repository for nomenclature items, their per-country listings, and the
//! listings' own periods.
//!
//! Reads are assembled from four batched queries (items, listings, listing
//! periods, referenced template periods) and grouped in memory, so listing
//! N items costs a constant number of round trips.

use std::collections::HashMap;

use catalog_core::seasonality::Seasonality;
use catalog_core::types::DbId;
use sqlx::PgPool;

use super::period_rows::{insert_periods, load_periods, LISTING_PERIODS, TEMPLATE_PERIODS};
use crate::models::nomenclature::{
    ListingRow, ListingView, NewListing, NewNomenclature, NomenclatureItem,
    NomenclatureWithListings, ResolvedSeasonality,
};

const ITEM_COLUMNS: &str = "id, name, created_at, updated_at";

/// Listing columns joined with country, brand and template names.
const LISTING_COLUMNS: &str = "l.id, l.item_id, l.country_id, c.name AS country_name, \
    l.brand_id, b.name AS brand_name, l.sku_code, l.listing_type, l.is_new_until, \
    l.template_id, t.name AS template_name";

/// Provides CRUD operations for nomenclature items and their listings.
pub struct NomenclatureRepo;

impl NomenclatureRepo {
    /// List all items with their listings, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<NomenclatureWithListings>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM nomenclature_items ORDER BY created_at DESC, id DESC"
        );
        let items = sqlx::query_as::<_, NomenclatureItem>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_listings(pool, items).await
    }

    /// Find one item with its listings.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NomenclatureWithListings>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM nomenclature_items WHERE id = $1");
        let Some(item) = sqlx::query_as::<_, NomenclatureItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        Ok(Self::attach_listings(pool, vec![item]).await?.pop())
    }

    /// Insert an item with all of its listings in one transaction.
    ///
    /// Any failure (unknown country, brand or template, or a SKU already
    /// used in the same country and brand) rolls back the whole item.
    pub async fn create(
        pool: &PgPool,
        input: &NewNomenclature,
    ) -> Result<NomenclatureWithListings, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO nomenclature_items (name) VALUES ($1) RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, NomenclatureItem>(&query)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;
        for listing in &input.listings {
            Self::insert_listing(&mut tx, item.id, listing).await?;
        }

        tx.commit().await?;
        Self::find_by_id(pool, item.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Rename an item and replace its full listing set.
    ///
    /// Existing listings and their periods are deleted and the submitted set
    /// is inserted in the same transaction. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewNomenclature,
    ) -> Result<Option<NomenclatureWithListings>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let renamed = sqlx::query("UPDATE nomenclature_items SET name = $2 WHERE id = $1")
            .bind(id)
            .bind(&input.name)
            .execute(&mut *tx)
            .await?;
        if renamed.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM nomenclature_listings WHERE item_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for listing in &input.listings {
            Self::insert_listing(&mut tx, id, listing).await?;
        }
        tracing::debug!(item_id = id, listings = input.listings.len(), "Listings replaced");

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    /// Delete an item together with its listings and their periods.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM nomenclature_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn insert_listing(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        item_id: DbId,
        listing: &NewListing,
    ) -> Result<(), sqlx::Error> {
        let template_id = listing.seasonality.as_ref().and_then(Seasonality::template_id);
        let listing_id: DbId = sqlx::query_scalar(
            "INSERT INTO nomenclature_listings \
                (item_id, country_id, brand_id, sku_code, listing_type, is_new_until, template_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(item_id)
        .bind(listing.country_id)
        .bind(listing.brand_id)
        .bind(&listing.sku_code)
        .bind(listing.listing_type.as_str())
        .bind(listing.is_new_until)
        .bind(template_id)
        .fetch_one(&mut **tx)
        .await?;

        if let Some(Seasonality::Inline(periods)) = &listing.seasonality {
            insert_periods(&mut **tx, LISTING_PERIODS, listing_id, periods).await?;
        }
        Ok(())
    }

    /// Load listings for `items` and resolve each listing's seasonality.
    ///
    /// A listing that references a template reports the template's current
    /// periods; otherwise it reports its own.
    async fn attach_listings(
        pool: &PgPool,
        items: Vec<NomenclatureItem>,
    ) -> Result<Vec<NomenclatureWithListings>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let item_ids: Vec<DbId> = items.iter().map(|i| i.id).collect();

        let query = format!(
            "SELECT {LISTING_COLUMNS} \
             FROM nomenclature_listings l \
             JOIN countries c ON c.id = l.country_id \
             LEFT JOIN brands b ON b.id = l.brand_id \
             LEFT JOIN seasonality_templates t ON t.id = l.template_id \
             WHERE l.item_id = ANY($1) \
             ORDER BY l.item_id, c.name, l.id"
        );
        let rows = sqlx::query_as::<_, ListingRow>(&query)
            .bind(&item_ids)
            .fetch_all(pool)
            .await?;

        let own_ids: Vec<DbId> = rows
            .iter()
            .filter(|r| r.template_id.is_none())
            .map(|r| r.id)
            .collect();
        let mut template_ids: Vec<DbId> = rows.iter().filter_map(|r| r.template_id).collect();
        template_ids.sort_unstable();
        template_ids.dedup();

        let mut own_periods = load_periods(pool, LISTING_PERIODS, &own_ids).await?;
        let template_periods = load_periods(pool, TEMPLATE_PERIODS, &template_ids).await?;

        let mut by_item: HashMap<DbId, Vec<ListingView>> = HashMap::new();
        for row in rows {
            let periods = match row.template_id {
                Some(template_id) => template_periods
                    .get(&template_id)
                    .cloned()
                    .unwrap_or_default(),
                None => own_periods.remove(&row.id).unwrap_or_default(),
            };
            by_item.entry(row.item_id).or_default().push(ListingView {
                id: row.id,
                country_id: row.country_id,
                country_name: row.country_name,
                brand_id: row.brand_id,
                brand_name: row.brand_name,
                sku_code: row.sku_code,
                listing_type: row.listing_type,
                is_new_until: row.is_new_until,
                seasonality: ResolvedSeasonality {
                    template_id: row.template_id,
                    template_name: row.template_name,
                    periods,
                },
            });
        }

        Ok(items
            .into_iter()
            .map(|item| NomenclatureWithListings {
                countries: by_item.remove(&item.id).unwrap_or_default(),
                item,
            })
            .collect())
    }
}
