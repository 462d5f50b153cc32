//! Country entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `countries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Country {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a country.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryInput {
    #[serde(default)]
    pub name: String,
}
