//! Country control overlay: a regulatory "controlled" flag per country.
//!
//! The `country_controls` table is sparse; a country without a row is
//! reported as not controlled.

use catalog_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A country joined with its control flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CountryControl {
    /// The country id.
    pub id: DbId,
    pub name: String,
    pub is_controlled: bool,
}

/// Request body for `PUT /country-control/{country_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCountryControl {
    pub is_controlled: Option<bool>,
}
