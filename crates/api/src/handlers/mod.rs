pub mod auth;
pub mod brand;
pub mod category;
pub mod country;
pub mod country_control;
pub mod currency;
pub mod currency_rate;
pub mod health;
pub mod nomenclature;
pub mod seasonality;
