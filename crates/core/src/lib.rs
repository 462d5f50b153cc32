//! Domain layer for the catalog back-office service.
//!
//! Pure logic with no I/O: the error taxonomy, the fixed 366-day calendar,
//! seasonality period rules, the category forest, and small reference-data
//! validators shared by the database and HTTP layers.

pub mod category_tree;
pub mod currency;
pub mod day_of_year;
pub mod error;
pub mod listing;
pub mod seasonality;
pub mod types;
pub mod validation;
