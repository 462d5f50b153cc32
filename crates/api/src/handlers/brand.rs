//! Handlers for the `/brands` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::types::DbId;
use catalog_core::validation::validate_name;
use catalog_db::models::brand::BrandInput;
use catalog_db::repositories::BrandRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/brands
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(BrandRepo::list(&state.pool).await?))
}

/// GET /api/brands/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let brand = BrandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Brand", id))?;
    Ok(Json(brand))
}

/// POST /api/brands
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<BrandInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Brand", &input.name)?;
    let brand = BrandRepo::create(&state.pool, name).await?;
    tracing::info!(brand_id = brand.id, user_id = auth.user_id, "Brand created");
    Ok((StatusCode::CREATED, Json(brand)))
}

/// PUT /api/brands/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<BrandInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Brand", &input.name)?;
    let brand = BrandRepo::update(&state.pool, id, name)
        .await?
        .ok_or_else(|| AppError::not_found("Brand", id))?;
    tracing::info!(brand_id = id, user_id = auth.user_id, "Brand renamed");
    Ok(Json(brand))
}

/// DELETE /api/brands/{id}
///
/// Listings keep their SKU; only the brand reference is cleared.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !BrandRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Brand", id));
    }
    tracing::info!(brand_id = id, user_id = auth.user_id, "Brand deleted");
    Ok(Json(MessageResponse::new("Brand deleted successfully")))
}
