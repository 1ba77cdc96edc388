// src/handlers/rates.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::rates::{RateHistoryEntry, RateIncrease},
    services::rate_service::RateMode,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitialRatePayload {
    #[schema(example = "2000.00")]
    pub rate: Decimal,

    #[validate(length(min = 8, message = "Data de início obrigatória"))]
    #[schema(example = "2023-01-01")]
    pub start_date: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessIncreasePayload {
    #[validate(length(min = 8, message = "Data do reajuste obrigatória"))]
    #[schema(example = "2024-01-01")]
    pub increase_date: String,

    #[schema(example = "2060.00")]
    pub rate: Decimal,

    #[schema(example = "Reajuste anual")]
    pub notes: Option<String>,
}

// POST /api/properties/{address}/rates/initial
// Criação estrita: falha se o imóvel já tem registro de aluguel
#[utoipa::path(
    post,
    path = "/api/properties/{address}/rates/initial",
    tag = "Reajustes",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    request_body = InitialRatePayload,
    responses(
        (status = 201, description = "Aluguel inicial registrado", body = RateIncrease),
        (status = 404, description = "Imóvel não encontrado"),
        (status = 409, description = "Imóvel já possui registro de aluguel")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_initial_rate(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
    Json(payload): Json<InitialRatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let record = app_state
        .rate_service
        .set_initial_rate(
            &app_state.db_pool,
            &address,
            payload.rate,
            &payload.start_date,
            RateMode::Create,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

// PUT /api/properties/{address}/rates/initial
// "Novo inquilino, novo aluguel inicial": sobrescreve o snapshot existente
#[utoipa::path(
    put,
    path = "/api/properties/{address}/rates/initial",
    tag = "Reajustes",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    request_body = InitialRatePayload,
    responses(
        (status = 200, description = "Aluguel inicial redefinido", body = RateIncrease),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn reset_initial_rate(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
    Json(payload): Json<InitialRatePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let record = app_state
        .rate_service
        .set_initial_rate(
            &app_state.db_pool,
            &address,
            payload.rate,
            &payload.start_date,
            RateMode::Overwrite,
        )
        .await?;

    Ok((StatusCode::OK, Json(record)))
}

// POST /api/properties/{address}/rates/increase
#[utoipa::path(
    post,
    path = "/api/properties/{address}/rates/increase",
    tag = "Reajustes",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    request_body = ProcessIncreasePayload,
    responses(
        (status = 200, description = "Reajuste processado", body = RateIncrease),
        (status = 404, description = "Imóvel sem registro de aluguel")
    ),
    security(("api_jwt" = []))
)]
pub async fn process_increase(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
    Json(payload): Json<ProcessIncreasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let record = app_state
        .rate_service
        .process_increase(
            &app_state.db_pool,
            &address,
            &payload.increase_date,
            payload.rate,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(record)))
}

// GET /api/properties/{address}/rates/history
#[utoipa::path(
    get,
    path = "/api/properties/{address}/rates/history",
    tag = "Reajustes",
    params(("address" = String, Path, description = "Endereço do imóvel")),
    responses(
        (status = 200, description = "Histórico de reajustes (mais recente primeiro)", body = Vec<RateHistoryEntry>),
        (status = 404, description = "Imóvel não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_rate_history(
    State(app_state): State<AppState>,
    Path(address): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let history = app_state
        .rate_service
        .rate_history(&app_state.db_pool, &address)
        .await?;

    Ok((StatusCode::OK, Json(history)))
}
