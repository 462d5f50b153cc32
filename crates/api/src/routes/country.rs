//! Route definitions for the `/countries` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::country;
use crate::state::AppState;

/// Routes mounted at `/countries`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(country::list).post(country::create))
        .route(
            "/{id}",
            get(country::get_by_id)
                .put(country::update)
                .delete(country::delete),
        )
}
