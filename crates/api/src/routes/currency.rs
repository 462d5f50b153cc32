//! Route definitions for the `/currencies` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::currency;
use crate::state::AppState;

/// Routes mounted at `/currencies`.
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
        .route("/", get(currency::list).post(currency::create))
        .route(
            "/{id}",
            get(currency::get_by_id)
                .put(currency::update)
                .delete(currency::delete),
        )
}
