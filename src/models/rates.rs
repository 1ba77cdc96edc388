// src/models/rates.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Snapshot atual (1 linha mutável por imóvel) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateIncrease {
    pub id: Uuid,

    pub property_address: String,

    #[schema(value_type = String, format = Date, example = "2023-01-01")]
    pub latest_rate_increase_date: NaiveDate,

    #[schema(example = "2000.00")]
    pub latest_rental_rate: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub next_allowable_rental_increase_date: NaiveDate,

    #[schema(example = "2060.00")]
    pub next_allowable_rental_rate: Decimal,

    #[schema(value_type = String, format = Date, example = "2023-09-01")]
    pub reminder_date: NaiveDate,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Histórico (append-only, nunca alterado depois de gravado) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateHistory {
    pub id: Uuid,

    pub property_address: String,

    #[schema(value_type = String, format = Date, example = "2023-01-01")]
    pub increase_date: NaiveDate,

    // 0 é a sentinela de "não havia aluguel anterior"
    #[schema(example = "1850.00")]
    pub previous_rate: Decimal,

    #[schema(example = "1900.00")]
    pub new_rate: Decimal,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Entrada do histórico como a API devolve: linha + percentual calculado.
// O percentual é None quando previous_rate = 0 (nunca dividimos por zero).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateHistoryEntry {
    pub id: Uuid,

    #[schema(value_type = String, format = Date, example = "2023-01-01")]
    pub increase_date: NaiveDate,

    pub previous_rate: Decimal,
    pub new_rate: Decimal,

    #[schema(example = "2.70")]
    pub percent_increase: Option<Decimal>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}
