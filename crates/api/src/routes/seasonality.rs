//! Route definitions for the `/seasonality` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::seasonality;
use crate::state::AppState;

/// Routes mounted at `/seasonality`.
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
        .route("/", get(seasonality::list).post(seasonality::create))
        .route(
            "/{id}",
            get(seasonality::get_by_id)
                .put(seasonality::update)
                .delete(seasonality::delete),
        )
}
