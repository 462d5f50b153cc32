//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` input DTO for creates and full-replace updates

pub mod brand;
pub mod category;
pub mod country;
pub mod country_control;
pub mod currency;
pub mod currency_rate;
pub mod nomenclature;
pub mod period;
pub mod seasonality;
pub mod user;
