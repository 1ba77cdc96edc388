// src/models/reminders.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Lembretes de reajuste ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateReminderEntry {
    #[schema(example = "100 Test St, Vancouver")]
    pub property_address: String,

    #[schema(value_type = String, format = Date, example = "2023-01-01")]
    pub latest_rate_increase_date: NaiveDate,

    pub latest_rental_rate: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub next_allowable_rental_increase_date: NaiveDate,

    pub next_allowable_rental_rate: Decimal,

    #[schema(value_type = String, format = Date, example = "2023-09-01")]
    pub reminder_date: NaiveDate,

    // Meses de calendário inteiros desde o último reajuste
    #[schema(example = 14)]
    pub months_since_increase: i32,
}

// --- Lembretes de aniversário ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContactRole {
    Owner,
    Tenant,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayReminderEntry {
    #[schema(example = "Maria da Silva")]
    pub name: String,

    pub role: ContactRole,

    pub property_address: String,

    #[schema(value_type = String, format = Date, example = "1990-05-20")]
    pub birthday: NaiveDate,
}

// Linha crua do repositório: proprietário + endereço do imóvel (via join)
#[derive(Debug, Clone, FromRow)]
pub struct OwnerBirthdayRow {
    pub name: String,
    pub birthday: NaiveDate,
    pub property_address: String,
}
