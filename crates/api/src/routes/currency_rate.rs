//! Route definitions for the `/currency-rates` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::currency_rate;
use crate::state::AppState;

/// Routes mounted at `/currency-rates`.
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
        .route("/", get(currency_rate::list).post(currency_rate::create))
        .route(
            "/{id}",
            get(currency_rate::get_by_id)
                .put(currency_rate::update)
                .delete(currency_rate::delete),
        )
}
