//! Handlers for the `/seasonality` resource (seasonality templates).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::seasonality::validate_periods;
use catalog_core::types::DbId;
use catalog_core::validation::validate_name;
use catalog_db::models::seasonality::TemplateInput;
use catalog_db::repositories::SeasonalityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Seasonality template";

/// GET /api/seasonality
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<impl IntoResponse> {
    let templates = SeasonalityRepo::list_with_periods(&state.pool).await?;
    Ok(Json(templates))
}

/// GET /api/seasonality/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = SeasonalityRepo::find_with_periods(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;
    Ok(Json(template))
}

/// POST /api/seasonality
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<TemplateInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name(ENTITY, &input.name)?;
    validate_periods(&input.periods)?;

    let template = SeasonalityRepo::create(&state.pool, name, &input.periods).await?;
    tracing::info!(
        template_id = template.template.id,
        periods = template.periods.len(),
        user_id = auth.user_id,
        "Seasonality template created"
    );
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/seasonality/{id}
///
/// Replaces the name and the whole period set. Listings that reference the
/// template pick up the new periods immediately.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<TemplateInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name(ENTITY, &input.name)?;
    validate_periods(&input.periods)?;

    let template = SeasonalityRepo::update(&state.pool, id, name, &input.periods)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;
    tracing::info!(template_id = id, user_id = auth.user_id, "Seasonality template updated");
    Ok(Json(template))
}

/// DELETE /api/seasonality/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SeasonalityRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ENTITY, id));
    }
    tracing::info!(template_id = id, user_id = auth.user_id, "Seasonality template deleted");
    Ok(Json(MessageResponse::new(
        "Seasonality template deleted successfully",
    )))
}
