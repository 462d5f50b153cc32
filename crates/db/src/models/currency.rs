//! Currency entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `currencies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Currency {
    pub id: DbId,
    pub name: String,
    /// Three upper-case letters.
    pub code: String,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a currency.
///
/// `code` is normalised (trimmed, upper-cased) by the handler before it
/// reaches the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Result of a transactional currency update.
#[derive(Debug)]
pub enum CurrencyUpdate {
    Updated(Currency),
    NotFound,
    /// The currency would become the default but already has rates.
    HasRates { code: String },
}
