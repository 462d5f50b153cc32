//! Handlers for the `/currency-rates` resource.
//!
//! A rate is the number of units of a currency per one unit of the default
//! currency on a given date.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::currency::validate_rate_value;
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use catalog_db::models::currency_rate::{
    CreateCurrencyRate, CurrencyRateFilter, RateCreate, UpdateCurrencyRate,
};
use catalog_db::repositories::CurrencyRateRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Currency rate";

fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::Core(CoreError::Validation(format!("{field} is required"))))
}

/// GET /api/currency-rates?currency_id=
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<CurrencyRateFilter>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(CurrencyRateRepo::list(&state.pool, &filter).await?))
}

/// GET /api/currency-rates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rate = CurrencyRateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;
    Ok(Json(rate))
}

/// POST /api/currency-rates
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateCurrencyRate>,
) -> AppResult<impl IntoResponse> {
    let currency_id = required(input.currency_id, "currency_id")?;
    let rate_date = required(input.rate_date, "rate_date")?;
    let rate_value = required(input.rate_value, "rate_value")?;
    validate_rate_value(rate_value)?;

    let rate = match CurrencyRateRepo::create(&state.pool, currency_id, rate_date, rate_value).await? {
        RateCreate::Created(rate) => rate,
        RateCreate::CurrencyNotFound => {
            return Err(AppError::Core(CoreError::InvalidReference {
                entity: "Currency",
                id: currency_id,
            }))
        }
        RateCreate::DefaultCurrency { code } => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{code} is the default currency and cannot have rates"
            ))))
        }
    };
    tracing::info!(
        rate_id = rate.id,
        currency_id,
        %rate_date,
        user_id = auth.user_id,
        "Currency rate created"
    );
    Ok((StatusCode::CREATED, Json(rate)))
}

/// PUT /api/currency-rates/{id}
///
/// Omitted fields keep their current value.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCurrencyRate>,
) -> AppResult<impl IntoResponse> {
    if let Some(rate_value) = input.rate_value {
        validate_rate_value(rate_value)?;
    }
    let rate = CurrencyRateRepo::update(&state.pool, id, input.rate_date, input.rate_value)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY, id))?;
    tracing::info!(rate_id = id, user_id = auth.user_id, "Currency rate updated");
    Ok(Json(rate))
}

/// DELETE /api/currency-rates/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CurrencyRateRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found(ENTITY, id));
    }
    tracing::info!(rate_id = id, user_id = auth.user_id, "Currency rate deleted");
    Ok(Json(MessageResponse::new("Currency rate deleted successfully")))
}
