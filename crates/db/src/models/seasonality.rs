//! Seasonality template model and DTOs.
//!
//! A template is a named, reusable set of non-overlapping day-of-year
//! periods. Listings may reference a template instead of owning periods.

use catalog_core::seasonality::DayRange;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `seasonality_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeasonalityTemplate {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A template enriched with its periods in insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateWithPeriods {
    #[serde(flatten)]
    pub template: SeasonalityTemplate,
    pub periods: Vec<DayRange>,
}

/// DTO for creating a template or replacing its name and full period set.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub periods: Vec<DayRange>,
}
