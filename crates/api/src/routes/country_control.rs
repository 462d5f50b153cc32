//! Route definitions for the `/country-control` overlay.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::country_control;
use crate::state::AppState;

/// Routes mounted at `/country-control`.
///
/// ```text
/// GET /               -> list
/// PUT /{country_id}   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(country_control::list))
        .route("/{country_id}", put(country_control::update))
}
