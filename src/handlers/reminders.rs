// src/handlers/reminders.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::reminders::{BirthdayReminderEntry, RateReminderEntry},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RateReminderQuery {
    // Mês (1-12) da reminder_date; sem filtro quando ausente
    pub month: Option<u32>,

    // Mínimo de meses desde o último reajuste
    pub min_months: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayReminderQuery {
    // Mês alvo (1-12); padrão: mês atual
    pub month: Option<u32>,
}

// GET /api/reminders/rates
#[utoipa::path(
    get,
    path = "/api/reminders/rates",
    tag = "Lembretes",
    params(RateReminderQuery),
    responses((status = 200, description = "Imóveis por atraso de reajuste, mais atrasado primeiro", body = Vec<RateReminderEntry>)),
    security(("api_jwt" = []))
)]
pub async fn rate_reminders(
    State(app_state): State<AppState>,
    Query(query): Query<RateReminderQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();

    let entries = app_state
        .reminder_service
        .rate_reminders(&app_state.db_pool, today, query.month, query.min_months)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/reminders/birthdays
#[utoipa::path(
    get,
    path = "/api/reminders/birthdays",
    tag = "Lembretes",
    params(BirthdayReminderQuery),
    responses((status = 200, description = "Aniversários do mês, por dia crescente", body = Vec<BirthdayReminderEntry>)),
    security(("api_jwt" = []))
)]
pub async fn birthday_reminders(
    State(app_state): State<AppState>,
    Query(query): Query<BirthdayReminderQuery>,
) -> Result<impl IntoResponse, AppError> {
    let target_month = query.month.unwrap_or_else(|| Utc::now().month());

    let entries = app_state
        .reminder_service
        .birthday_reminders(&app_state.db_pool, target_month)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}
