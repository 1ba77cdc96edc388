// src/db/rates_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::rates::{RateHistory, RateIncrease},
};

/// Campos calculados do snapshot, prontos para gravação.
#[derive(Debug, Clone)]
pub struct RateSnapshotFields {
    pub latest_rate_increase_date: NaiveDate,
    pub latest_rental_rate: Decimal,
    pub next_allowable_rental_increase_date: NaiveDate,
    pub next_allowable_rental_rate: Decimal,
    pub reminder_date: NaiveDate,
}

#[derive(Clone)]
pub struct RatesRepository {
    pool: PgPool,
}

impl RatesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  SNAPSHOT (rate_increases: 1 linha por imóvel)
    // =========================================================================

    pub async fn get_rate_record<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<Option<RateIncrease>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, RateIncrease>(
            "SELECT * FROM rate_increases WHERE property_address = $1",
        )
        .bind(property_address)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    // INSERT estrito: usado pelo modo Create do valor inicial.
    // A UNIQUE de property_address transforma a corrida de dois "iniciais"
    // simultâneos em DuplicateRateRecord para o segundo.
    pub async fn insert_rate_record<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        fields: &RateSnapshotFields,
    ) -> Result<RateIncrease, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, RateIncrease>(
            r#"
            INSERT INTO rate_increases (
                property_address,
                latest_rate_increase_date, latest_rental_rate,
                next_allowable_rental_increase_date, next_allowable_rental_rate,
                reminder_date
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, property_address,
                latest_rate_increase_date, latest_rental_rate,
                next_allowable_rental_increase_date, next_allowable_rental_rate,
                reminder_date, created_at, updated_at
            "#,
        )
        .bind(property_address)
        .bind(fields.latest_rate_increase_date)
        .bind(fields.latest_rental_rate)
        .bind(fields.next_allowable_rental_increase_date)
        .bind(fields.next_allowable_rental_rate)
        .bind(fields.reminder_date)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateRateRecord;
                }
            }
            e.into()
        })?;

        Ok(record)
    }

    // Upsert: sobrescreve o snapshot no lugar (modo Overwrite e reajustes)
    pub async fn upsert_rate_record<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        fields: &RateSnapshotFields,
    ) -> Result<RateIncrease, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, RateIncrease>(
            r#"
            INSERT INTO rate_increases (
                property_address,
                latest_rate_increase_date, latest_rental_rate,
                next_allowable_rental_increase_date, next_allowable_rental_rate,
                reminder_date
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (property_address) DO UPDATE SET
                latest_rate_increase_date = EXCLUDED.latest_rate_increase_date,
                latest_rental_rate = EXCLUDED.latest_rental_rate,
                next_allowable_rental_increase_date = EXCLUDED.next_allowable_rental_increase_date,
                next_allowable_rental_rate = EXCLUDED.next_allowable_rental_rate,
                reminder_date = EXCLUDED.reminder_date,
                updated_at = now()
            RETURNING
                id, property_address,
                latest_rate_increase_date, latest_rental_rate,
                next_allowable_rental_increase_date, next_allowable_rental_rate,
                reminder_date, created_at, updated_at
            "#,
        )
        .bind(property_address)
        .bind(fields.latest_rate_increase_date)
        .bind(fields.latest_rental_rate)
        .bind(fields.next_allowable_rental_increase_date)
        .bind(fields.next_allowable_rental_rate)
        .bind(fields.reminder_date)
        .fetch_one(executor)
        .await?;

        Ok(record)
    }

    // Para o lembrete de reajustes: todos os snapshots de uma vez
    pub async fn list_rate_records<'e, E>(&self, executor: E) -> Result<Vec<RateIncrease>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let records = sqlx::query_as::<_, RateIncrease>(
            "SELECT * FROM rate_increases ORDER BY property_address ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(records)
    }

    // =========================================================================
    //  HISTÓRICO (rate_history: append-only)
    // =========================================================================

    pub async fn append_rate_history<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        increase_date: NaiveDate,
        previous_rate: Decimal,
        new_rate: Decimal,
        notes: Option<&str>,
    ) -> Result<RateHistory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, RateHistory>(
            r#"
            INSERT INTO rate_history (property_address, increase_date, previous_rate, new_rate, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, property_address, increase_date, previous_rate, new_rate, notes, created_at
            "#,
        )
        .bind(property_address)
        .bind(increase_date)
        .bind(previous_rate)
        .bind(new_rate)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    pub async fn list_rate_history<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<Vec<RateHistory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, RateHistory>(
            r#"
            SELECT * FROM rate_history
            WHERE property_address = $1
            ORDER BY increase_date DESC, created_at DESC
            "#,
        )
        .bind(property_address)
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }
}
