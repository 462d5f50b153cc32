//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Writes that touch more than one
//! table run inside a single transaction.

pub mod brand_repo;
pub mod category_repo;
pub mod country_control_repo;
pub mod country_repo;
pub mod currency_rate_repo;
pub mod currency_repo;
pub mod nomenclature_repo;
mod period_rows;
pub mod seasonality_repo;
pub mod user_repo;

pub use brand_repo::BrandRepo;
pub use category_repo::CategoryRepo;
pub use country_control_repo::CountryControlRepo;
pub use country_repo::CountryRepo;
pub use currency_rate_repo::CurrencyRateRepo;
pub use currency_repo::CurrencyRepo;
pub use nomenclature_repo::NomenclatureRepo;
pub use seasonality_repo::SeasonalityRepo;
pub use user_repo::UserRepo;
