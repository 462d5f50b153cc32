//! Nomenclature catalog models and DTOs.
//!
//! An item owns one listing per country. Each listing carries its SKU, an
//! optional brand, a commercial type, an optional "new until" instant, and a
//! seasonality that is either a live template reference or the listing's own
//! periods.

use catalog_core::error::CoreError;
use catalog_core::listing::{find_duplicate_country, validate_sku_code, ListingType};
use catalog_core::seasonality::{DayRange, Seasonality, SeasonalityInput};
use catalog_core::types::{DbId, Timestamp};
use catalog_core::validation::validate_name;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `nomenclature_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NomenclatureItem {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A `nomenclature_listings` row joined with country, brand and template names.
#[derive(Debug, Clone, FromRow)]
pub struct ListingRow {
    pub id: DbId,
    pub item_id: DbId,
    pub country_id: DbId,
    pub country_name: String,
    pub brand_id: Option<DbId>,
    pub brand_name: Option<String>,
    pub sku_code: String,
    pub listing_type: String,
    pub is_new_until: Option<Timestamp>,
    pub template_id: Option<DbId>,
    pub template_name: Option<String>,
}

/// Seasonality as returned to clients, with periods already resolved.
///
/// When `template_id` is set the periods are the template's current periods;
/// otherwise they are the listing's own (possibly empty for year-round items).
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSeasonality {
    pub template_id: Option<DbId>,
    pub template_name: Option<String>,
    pub periods: Vec<DayRange>,
}

/// A listing as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub id: DbId,
    pub country_id: DbId,
    pub country_name: String,
    pub brand_id: Option<DbId>,
    pub brand_name: Option<String>,
    pub sku_code: String,
    #[serde(rename = "type")]
    pub listing_type: String,
    pub is_new_until: Option<Timestamp>,
    pub seasonality: ResolvedSeasonality,
}

/// An item with all of its listings.
#[derive(Debug, Clone, Serialize)]
pub struct NomenclatureWithListings {
    #[serde(flatten)]
    pub item: NomenclatureItem,
    pub countries: Vec<ListingView>,
}

/// One listing as submitted by clients.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingInput {
    pub country_id: DbId,
    #[serde(default)]
    pub brand_id: Option<DbId>,
    #[serde(default)]
    pub sku_code: String,
    #[serde(rename = "type", default = "default_listing_type")]
    pub listing_type: ListingType,
    #[serde(default)]
    pub is_new_until: Option<Timestamp>,
    /// Absent, `null`, or `{}` all mean "no seasonality".
    #[serde(default)]
    pub seasonality: Option<SeasonalityInput>,
}

fn default_listing_type() -> ListingType {
    ListingType::Regular
}

/// Request body for creating an item or fully replacing it.
#[derive(Debug, Clone, Deserialize)]
pub struct NomenclatureInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub countries: Vec<ListingInput>,
}

/// A listing that passed validation and is ready to insert.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub country_id: DbId,
    pub brand_id: Option<DbId>,
    pub sku_code: String,
    pub listing_type: ListingType,
    pub is_new_until: Option<Timestamp>,
    pub seasonality: Option<Seasonality>,
}

/// A validated item submission.
#[derive(Debug, Clone)]
pub struct NewNomenclature {
    pub name: String,
    pub listings: Vec<NewListing>,
}

impl ListingInput {
    /// Check the listing fields and resolve its seasonality into the union.
    pub fn validate(self) -> Result<NewListing, CoreError> {
        let sku_code = validate_sku_code(&self.sku_code)?.to_string();
        let seasonality = match self.seasonality {
            Some(input) if input.template_id.is_some() || !input.periods.is_empty() => {
                Some(Seasonality::try_from(input)?)
            }
            _ => None,
        };
        Ok(NewListing {
            country_id: self.country_id,
            brand_id: self.brand_id,
            sku_code,
            listing_type: self.listing_type,
            is_new_until: self.is_new_until,
            seasonality,
        })
    }
}

impl NomenclatureInput {
    /// Validate the whole submission before any row is written.
    ///
    /// A country may appear at most once per item; repeats are rejected
    /// rather than silently skipped.
    pub fn validate(self) -> Result<NewNomenclature, CoreError> {
        let name = validate_name("Nomenclature", &self.name)?.to_string();
        if let Some(country_id) = find_duplicate_country(self.countries.iter().map(|c| c.country_id))
        {
            return Err(CoreError::Validation(format!(
                "Country {country_id} is listed more than once"
            )));
        }
        let listings = self
            .countries
            .into_iter()
            .map(ListingInput::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewNomenclature { name, listings })
    }
}
