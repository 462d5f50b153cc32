//! Handlers for the `/country-control` overlay.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::country_control::UpdateCountryControl;
use catalog_db::repositories::{CountryControlRepo, CountryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/country-control
///
/// Every country with its `is_controlled` flag.
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(CountryControlRepo::list(&state.pool).await?))
}

/// PUT /api/country-control/{country_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(country_id): Path<DbId>,
    Json(input): Json<UpdateCountryControl>,
) -> AppResult<impl IntoResponse> {
    let is_controlled = input.is_controlled.ok_or_else(|| {
        AppError::Core(CoreError::Validation("is_controlled is required".into()))
    })?;
    if CountryRepo::find_by_id(&state.pool, country_id).await?.is_none() {
        return Err(AppError::not_found("Country", country_id));
    }

    let control = CountryControlRepo::upsert(&state.pool, country_id, is_controlled).await?;
    tracing::info!(country_id, is_controlled, user_id = auth.user_id, "Country control set");
    Ok(Json(control))
}
