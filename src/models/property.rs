// src/models/property.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::rates::RateIncrease;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    FullService,       // Administração completa
    TenantReplacement, // Só troca de inquilino
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,

    // Identidade do imóvel: única e imutável após o cadastro
    #[schema(example = "100 Test St, Vancouver")]
    pub property_address: String,

    #[schema(example = "K-042")]
    pub key_number: Option<String>,

    pub service_type: ServiceType,

    // Contato do condomínio (opcional)
    #[schema(example = "Pacific Strata Services")]
    pub strata_company: Option<String>,
    pub strata_contact_name: Option<String>,
    pub strata_phone: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Uuid,

    #[schema(ignore)]
    pub property_id: Uuid,

    #[schema(example = "João Pereira")]
    pub name: String,

    pub contact_number: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "1960-04-12")]
    pub birthday: Option<NaiveDate>,

    pub residential_address: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,

    pub property_address: String,

    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[schema(value_type = String, format = Date, example = "2023-06-01")]
    pub move_in_date: NaiveDate,

    // Null = ainda mora no imóvel
    #[schema(value_type = Option<String>, format = Date, example = "2024-06-01")]
    pub move_out_date: Option<NaiveDate>,

    pub contact_number: Option<String>,
    pub email: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "1990-05-20")]
    pub birthday: Option<NaiveDate>,

    // Entre os inquilinos ativos, o principal é o usado nas telas de inquilino único
    pub is_primary: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// O inquilino morava no imóvel na data dada?
    /// Entrada no próprio dia conta; saída no próprio dia já não conta.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.move_in_date <= date && self.move_out_date.is_none_or(|out| out > date)
    }

    pub fn is_active(&self) -> bool {
        self.move_out_date.is_none()
    }
}

/// Par entrada/saída validado na construção: o banco não impõe essa regra,
/// então nenhum `Tenant` é gravado sem passar por aqui.
#[derive(Debug, Clone, Copy)]
pub struct TenancyPeriod {
    move_in: NaiveDate,
    move_out: Option<NaiveDate>,
}

impl TenancyPeriod {
    pub fn new(move_in: NaiveDate, move_out: Option<NaiveDate>) -> Result<Self, AppError> {
        if let Some(out) = move_out {
            if out < move_in {
                return Err(AppError::InvalidTenancyPeriod);
            }
        }
        Ok(Self { move_in, move_out })
    }

    pub fn move_in(&self) -> NaiveDate {
        self.move_in
    }

    pub fn move_out(&self) -> Option<NaiveDate> {
        self.move_out
    }
}

// --- Payload de leitura (detalhe do imóvel) ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    pub property: Property,

    pub owners: Vec<Owner>,

    // Todos os inquilinos, do mais recente para o mais antigo
    pub tenants: Vec<Tenant>,

    pub current_tenant: Option<Tenant>,

    // Omitido quando o snapshot de aluguel pertence a uma locação anterior
    pub rental_info: Option<RateIncrease>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tenancy_period_rejects_move_out_before_move_in() {
        let result = TenancyPeriod::new(date(2023, 6, 1), Some(date(2023, 5, 31)));
        assert!(matches!(result, Err(AppError::InvalidTenancyPeriod)));
    }

    #[test]
    fn tenancy_period_accepts_same_day_and_open_end() {
        assert!(TenancyPeriod::new(date(2023, 6, 1), Some(date(2023, 6, 1))).is_ok());
        assert!(TenancyPeriod::new(date(2023, 6, 1), None).is_ok());
    }
}
