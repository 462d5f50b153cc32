//! Brand entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a brand.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandInput {
    #[serde(default)]
    pub name: String,
}
