// src/db/property_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::property::{Owner, Property, ServiceType, Tenant},
    models::reminders::OwnerBirthdayRow,
};

#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  IMÓVEIS
    // =========================================================================

    pub async fn create_property<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        key_number: Option<&str>,
        service_type: ServiceType,
        strata_company: Option<&str>,
        strata_contact_name: Option<&str>,
        strata_phone: Option<&str>,
    ) -> Result<Property, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let property = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                property_address, key_number, service_type,
                strata_company, strata_contact_name, strata_phone
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, property_address, key_number, service_type,
                strata_company, strata_contact_name, strata_phone,
                created_at, updated_at
            "#,
        )
        .bind(property_address)
        .bind(key_number)
        .bind(service_type)
        .bind(strata_company)
        .bind(strata_contact_name)
        .bind(strata_phone)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                // O nome padrão que o Postgres cria para "UNIQUE" na coluna
                if db_err.is_unique_violation() {
                    return AppError::DuplicateProperty;
                }
            }
            e.into()
        })?;

        Ok(property)
    }

    pub async fn list_properties<'e, E>(&self, executor: E) -> Result<Vec<Property>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let properties = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties ORDER BY property_address ASC",
        )
        .fetch_all(executor)
        .await?;

        Ok(properties)
    }

    pub async fn find_by_address<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<Option<Property>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let maybe = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE property_address = $1",
        )
        .bind(property_address)
        .fetch_optional(executor)
        .await?;

        Ok(maybe)
    }

    // O endereço é imutável; só os demais campos podem mudar.
    pub async fn update_property<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        key_number: Option<&str>,
        service_type: ServiceType,
        strata_company: Option<&str>,
        strata_contact_name: Option<&str>,
        strata_phone: Option<&str>,
    ) -> Result<Property, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties SET
                key_number = $2,
                service_type = $3,
                strata_company = $4,
                strata_contact_name = $5,
                strata_phone = $6,
                updated_at = now()
            WHERE property_address = $1
            RETURNING
                id, property_address, key_number, service_type,
                strata_company, strata_contact_name, strata_phone,
                created_at, updated_at
            "#,
        )
        .bind(property_address)
        .bind(key_number)
        .bind(service_type)
        .bind(strata_company)
        .bind(strata_contact_name)
        .bind(strata_phone)
        .fetch_optional(executor)
        .await?;

        updated.ok_or(AppError::PropertyNotFound)
    }

    // Cascata do banco remove proprietários, inquilinos e registros de aluguel
    pub async fn delete_property<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM properties WHERE property_address = $1")
            .bind(property_address)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::PropertyNotFound);
        }
        Ok(())
    }

    // =========================================================================
    //  PROPRIETÁRIOS
    // =========================================================================

    pub async fn create_owner<'e, E>(
        &self,
        executor: E,
        property_id: Uuid,
        name: &str,
        contact_number: Option<&str>,
        birthday: Option<NaiveDate>,
        residential_address: Option<&str>,
    ) -> Result<Owner, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO owners (property_id, name, contact_number, birthday, residential_address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, property_id, name, contact_number, birthday, residential_address, created_at
            "#,
        )
        .bind(property_id)
        .bind(name)
        .bind(contact_number)
        .bind(birthday)
        .bind(residential_address)
        .fetch_one(executor)
        .await?;

        Ok(owner)
    }

    pub async fn list_owners<'e, E>(
        &self,
        executor: E,
        property_id: Uuid,
    ) -> Result<Vec<Owner>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let owners = sqlx::query_as::<_, Owner>(
            "SELECT * FROM owners WHERE property_id = $1 ORDER BY name ASC",
        )
        .bind(property_id)
        .fetch_all(executor)
        .await?;

        Ok(owners)
    }

    pub async fn update_owner<'e, E>(
        &self,
        executor: E,
        owner_id: Uuid,
        name: &str,
        contact_number: Option<&str>,
        birthday: Option<NaiveDate>,
        residential_address: Option<&str>,
    ) -> Result<Owner, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Owner>(
            r#"
            UPDATE owners SET
                name = $2,
                contact_number = $3,
                birthday = $4,
                residential_address = $5
            WHERE id = $1
            RETURNING id, property_id, name, contact_number, birthday, residential_address, created_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(contact_number)
        .bind(birthday)
        .bind(residential_address)
        .fetch_optional(executor)
        .await?;

        updated.ok_or(AppError::OwnerNotFound)
    }

    pub async fn delete_owner<'e, E>(&self, executor: E, owner_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(owner_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::OwnerNotFound);
        }
        Ok(())
    }

    // Para o lembrete de aniversários: só quem tem aniversário cadastrado,
    // com o endereço do imóvel junto (o filtro de mês fica no service)
    pub async fn list_owners_with_birthday<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<OwnerBirthdayRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, OwnerBirthdayRow>(
            r#"
            SELECT o.name, o.birthday, p.property_address
            FROM owners o
            JOIN properties p ON p.id = o.property_id
            WHERE o.birthday IS NOT NULL
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    // =========================================================================
    //  INQUILINOS
    // =========================================================================

    pub async fn create_tenant<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        name: &str,
        move_in_date: NaiveDate,
        move_out_date: Option<NaiveDate>,
        contact_number: Option<&str>,
        email: Option<&str>,
        birthday: Option<NaiveDate>,
        is_primary: bool,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (
                property_address, name, move_in_date, move_out_date,
                contact_number, email, birthday, is_primary
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, property_address, name, move_in_date, move_out_date,
                contact_number, email, birthday, is_primary, created_at, updated_at
            "#,
        )
        .bind(property_address)
        .bind(name)
        .bind(move_in_date)
        .bind(move_out_date)
        .bind(contact_number)
        .bind(email)
        .bind(birthday)
        .bind(is_primary)
        .fetch_one(executor)
        .await?;

        Ok(tenant)
    }

    // Todos os inquilinos do imóvel (ativos e antigos), mais recente primeiro
    pub async fn list_tenants<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<Vec<Tenant>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenants = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT * FROM tenants
            WHERE property_address = $1
            ORDER BY move_in_date DESC
            "#,
        )
        .bind(property_address)
        .fetch_all(executor)
        .await?;

        Ok(tenants)
    }

    pub async fn update_tenant<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        name: &str,
        move_in_date: NaiveDate,
        move_out_date: Option<NaiveDate>,
        contact_number: Option<&str>,
        email: Option<&str>,
        birthday: Option<NaiveDate>,
        is_primary: bool,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants SET
                name = $2,
                move_in_date = $3,
                move_out_date = $4,
                contact_number = $5,
                email = $6,
                birthday = $7,
                is_primary = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING
                id, property_address, name, move_in_date, move_out_date,
                contact_number, email, birthday, is_primary, created_at, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(move_in_date)
        .bind(move_out_date)
        .bind(contact_number)
        .bind(email)
        .bind(birthday)
        .bind(is_primary)
        .fetch_optional(executor)
        .await?;

        updated.ok_or(AppError::TenantNotFound)
    }

    pub async fn delete_tenant<'e, E>(&self, executor: E, tenant_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::TenantNotFound);
        }
        Ok(())
    }

    // Inquilinos ativos de todos os imóveis, para o lembrete de aniversários
    pub async fn list_active_tenants<'e, E>(&self, executor: E) -> Result<Vec<Tenant>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let tenants = sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE move_out_date IS NULL",
        )
        .fetch_all(executor)
        .await?;

        Ok(tenants)
    }
}
