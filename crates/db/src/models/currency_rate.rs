//! Currency rate model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `currency_rates` row joined with its currency's name and code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CurrencyRate {
    pub id: DbId,
    pub currency_id: DbId,
    pub currency_name: String,
    pub currency_code: String,
    pub rate_date: NaiveDate,
    /// Foreign units per one unit of the default currency.
    pub rate_value: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /currency-rates`. All fields are required; they are
/// optional here so a missing field is reported as a validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCurrencyRate {
    pub currency_id: Option<DbId>,
    pub rate_date: Option<NaiveDate>,
    pub rate_value: Option<Decimal>,
}

/// Request body for `PUT /currency-rates/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCurrencyRate {
    pub rate_date: Option<NaiveDate>,
    pub rate_value: Option<Decimal>,
}

/// Query parameters for `GET /currency-rates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrencyRateFilter {
    pub currency_id: Option<DbId>,
}

/// Result of a transactional rate insert.
#[derive(Debug)]
pub enum RateCreate {
    Created(CurrencyRate),
    /// The referenced currency does not exist.
    CurrencyNotFound,
    /// The referenced currency is the default and cannot carry rates.
    DefaultCurrency { code: String },
}
