//! Per-country listing rules for nomenclature items.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum allowed length for a SKU code.
pub const MAX_SKU_LENGTH: usize = 64;

/// Commercial type of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Regular,
    Exclusive,
}

impl ListingType {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingType::Regular => "regular",
            ListingType::Exclusive => "exclusive",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(ListingType::Regular),
            "exclusive" => Ok(ListingType::Exclusive),
            other => Err(CoreError::Validation(format!(
                "Listing type must be 'regular' or 'exclusive', got '{other}'"
            ))),
        }
    }
}

/// Validate a SKU code and return it trimmed.
pub fn validate_sku_code(sku: &str) -> Result<&str, CoreError> {
    let trimmed = sku.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("SKU code is required".to_string()));
    }
    if trimmed.chars().count() > MAX_SKU_LENGTH {
        return Err(CoreError::Validation(format!(
            "SKU code must not exceed {MAX_SKU_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

/// Return the first country id that appears more than once.
pub fn find_duplicate_country(country_ids: impl IntoIterator<Item = DbId>) -> Option<DbId> {
    let mut seen = HashSet::new();
    country_ids.into_iter().find(|id| !seen.insert(*id))
}
