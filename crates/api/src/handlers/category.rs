//! Handlers for the `/categories` resource.
//!
//! The list endpoint returns the whole hierarchy as a forest; single-row
//! endpoints return flat rows with `parent_id`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::category_tree::build_forest;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_core::validation::validate_name;
use catalog_db::models::category::{CategoryInput, CategoryUpdate};
use catalog_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(build_forest(categories)))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Category", &input.name)?;
    if let Some(parent_id) = input.parent_id {
        if CategoryRepo::find_by_id(&state.pool, parent_id).await?.is_none() {
            return Err(AppError::Core(CoreError::InvalidReference {
                entity: "Parent category",
                id: parent_id,
            }));
        }
    }

    let category = CategoryRepo::create(&state.pool, name, input.parent_id).await?;
    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/{id}
///
/// Rename and/or move a category. Moving a category under itself or any of
/// its descendants is rejected.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Category", &input.name)?;

    match CategoryRepo::update(&state.pool, id, name, input.parent_id).await? {
        CategoryUpdate::Updated(category) => {
            tracing::info!(category_id = id, user_id = auth.user_id, "Category updated");
            Ok(Json(category))
        }
        CategoryUpdate::NotFound => Err(AppError::not_found("Category", id)),
        CategoryUpdate::ParentNotFound(parent_id) => {
            Err(AppError::Core(CoreError::InvalidReference {
                entity: "Parent category",
                id: parent_id,
            }))
        }
        CategoryUpdate::Rejected(err) => Err(AppError::Core(err)),
    }
}

/// DELETE /api/categories/{id}
///
/// Removes the category and every descendant.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Category", id));
    }
    tracing::info!(category_id = id, user_id = auth.user_id, "Category deleted");
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
