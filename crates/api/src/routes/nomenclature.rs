//! Route definitions for the `/nomenclature` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::nomenclature;
use crate::state::AppState;

/// Routes mounted at `/nomenclature`.
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
        .route("/", get(nomenclature::list).post(nomenclature::create))
        .route(
            "/{id}",
            get(nomenclature::get_by_id)
                .put(nomenclature::update)
                .delete(nomenclature::delete),
        )
}
