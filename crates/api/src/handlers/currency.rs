//! Handlers for the `/currencies` resource.
//!
//! Exactly one currency may be the default; rates are expressed against it,
//! so a currency that already has rates cannot become the default.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::currency::normalize_currency_code;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_core::validation::validate_name;
use catalog_db::models::currency::{CurrencyInput, CurrencyUpdate};
use catalog_db::repositories::CurrencyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/currencies
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(CurrencyRepo::list(&state.pool).await?))
}

/// GET /api/currencies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let currency = CurrencyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Currency", id))?;
    Ok(Json(currency))
}

/// POST /api/currencies
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CurrencyInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Currency", &input.name)?;
    let code = normalize_currency_code(&input.code)?;

    let currency = CurrencyRepo::create(&state.pool, name, &code, input.is_default).await?;
    tracing::info!(
        currency_id = currency.id,
        code = %currency.code,
        is_default = currency.is_default,
        user_id = auth.user_id,
        "Currency created"
    );
    Ok((StatusCode::CREATED, Json(currency)))
}

/// PUT /api/currencies/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CurrencyInput>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Currency", &input.name)?;
    let code = normalize_currency_code(&input.code)?;

    let currency = match CurrencyRepo::update(&state.pool, id, name, &code, input.is_default).await? {
        CurrencyUpdate::Updated(currency) => currency,
        CurrencyUpdate::NotFound => return Err(AppError::not_found("Currency", id)),
        CurrencyUpdate::HasRates { code } => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{code} has exchange rates and cannot become the default currency"
            ))))
        }
    };
    tracing::info!(currency_id = id, user_id = auth.user_id, "Currency updated");
    Ok(Json(currency))
}

/// DELETE /api/currencies/{id}
///
/// Rates for the currency are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CurrencyRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Currency", id));
    }
    tracing::info!(currency_id = id, user_id = auth.user_id, "Currency deleted");
    Ok(Json(MessageResponse::new("Currency deleted successfully")))
}
