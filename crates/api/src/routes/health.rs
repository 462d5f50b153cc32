use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// `GET /health`, mounted at the root outside `/api` and without auth.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
