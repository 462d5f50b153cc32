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

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Everything except `POST /auth/login` requires a bearer token; handlers
/// enforce this through the [`AuthUser`](crate::middleware::auth::AuthUser)
/// extractor.
///
/// ```text
/// /auth/login                      login (public)
/// /auth/change-password            change own password
/// /auth/me                         current user
///
/// /categories                      forest list, create
/// /categories/{id}                 get, update (rename / move), delete (subtree)
///
/// /seasonality                     list, create
/// /seasonality/{id}                get, update (full period replace), delete
///
/// /nomenclature                    list, create
/// /nomenclature/{id}               get, update (full listing replace), delete
///
/// /currencies                      list, create
/// /currencies/{id}                 get, update, delete
/// /currency-rates                  list (?currency_id=), create
/// /currency-rates/{id}             get, update, delete
///
/// /countries                       list, create
/// /countries/{id}                  get, update, delete
/// /brands                          list, create
/// /brands/{id}                     get, update, delete
/// /country-control                 list
/// /country-control/{country_id}    set flag (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", category::router())
        .nest("/seasonality", seasonality::router())
        .nest("/nomenclature", nomenclature::router())
        .nest("/currencies", currency::router())
        .nest("/currency-rates", currency_rate::router())
        .nest("/countries", country::router())
        .nest("/brands", brand::router())
        .nest("/country-control", country_control::router())
}
