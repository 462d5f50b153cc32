//! Handlers for the `/nomenclature` resource.
//!
//! Submissions are validated in full (names, SKUs, duplicate countries,
//! seasonality shape and periods) before anything is written.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::seasonality::Seasonality;
use catalog_core::types::DbId;
use catalog_db::models::nomenclature::{NewNomenclature, NomenclatureInput};
use catalog_db::repositories::{NomenclatureRepo, SeasonalityRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Nomenclature";

/// GET /api/nomenclature
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<impl IntoResponse> {
    let items = NomenclatureRepo::list(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/nomenclature/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = NomenclatureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;
    Ok(Json(item))
}

/// POST /api/nomenclature
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<NomenclatureInput>,
) -> AppResult<impl IntoResponse> {
    let input = validate(&state, input).await?;

    let item = NomenclatureRepo::create(&state.pool, &input).await?;
    tracing::info!(
        item_id = item.item.id,
        listings = item.countries.len(),
        user_id = auth.user_id,
        "Nomenclature item created"
    );
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/nomenclature/{id}
///
/// Renames the item and replaces its full listing set.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<NomenclatureInput>,
) -> AppResult<impl IntoResponse> {
    let input = validate(&state, input).await?;

    let item = NomenclatureRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;
    tracing::info!(
        item_id = id,
        listings = item.countries.len(),
        user_id = auth.user_id,
        "Nomenclature item updated"
    );
    Ok(Json(item))
}

/// DELETE /api/nomenclature/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !NomenclatureRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ENTITY, id));
    }
    tracing::info!(item_id = id, user_id = auth.user_id, "Nomenclature item deleted");
    Ok(Json(MessageResponse::new(
        "Nomenclature item deleted successfully",
    )))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate the submission and confirm every referenced template exists, so
/// a bad template id is reported by id instead of by constraint name.
async fn validate(state: &AppState, input: NomenclatureInput) -> AppResult<NewNomenclature> {
    let input = input.validate()?;
    for listing in &input.listings {
        if let Some(Seasonality::Template(template_id)) = &listing.seasonality {
            if !SeasonalityRepo::exists(&state.pool, *template_id).await? {
                return Err(AppError::Core(CoreError::InvalidReference {
                    entity: "Seasonality template",
                    id: *template_id,
                }));
            }
        }
    }
    Ok(input)
}
