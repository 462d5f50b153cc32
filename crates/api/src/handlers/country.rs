//! Handlers for the `/countries` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::types::DbId;
use catalog_core::validation::validate_name;
use catalog_db::models::country::CountryInput;
use catalog_db::repositories::CountryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/countries
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(CountryRepo::list(&state.pool).await?))
}

/// GET /api/countries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let country = CountryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Country", id))?;
    Ok(Json(country))
}

/// POST /api/countries
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CountryInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Country", &input.name)?;
    let country = CountryRepo::create(&state.pool, name).await?;
    tracing::info!(country_id = country.id, user_id = auth.user_id, "Country created");
    Ok((StatusCode::CREATED, Json(country)))
}

/// PUT /api/countries/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CountryInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Country", &input.name)?;
    let country = CountryRepo::update(&state.pool, id, name)
        .await?
        .ok_or_else(|| AppError::not_found("Country", id))?;
    tracing::info!(country_id = id, user_id = auth.user_id, "Country renamed");
    Ok(Json(country))
}

/// DELETE /api/countries/{id}
///
/// Listings in the country and its control flag are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CountryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Country", id));
    }
    tracing::info!(country_id = id, user_id = auth.user_id, "Country deleted");
    Ok(Json(MessageResponse::new("Country deleted successfully")))
}
