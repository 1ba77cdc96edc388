// src/services/property_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{dates::CanonicalDate, error::AppError},
    db::{PropertyRepository, RatesRepository},
    models::{
        property::{Owner, Property, PropertyDetail, ServiceType, Tenant, TenancyPeriod},
        rates::RateIncrease,
    },
};

// =============================================================================
//  REGRAS DE RECONCILIAÇÃO (puras, testadas abaixo)
// =============================================================================

/// Inquilino "atual" do imóvel: entre os ativos, o principal; sem principal,
/// o de entrada mais recente.
pub fn select_current_tenant(tenants: &[Tenant]) -> Option<&Tenant> {
    let active: Vec<&Tenant> = tenants.iter().filter(|t| t.is_active()).collect();
    active
        .iter()
        .find(|t| t.is_primary)
        .copied()
        .or_else(|| active.into_iter().max_by_key(|t| t.move_in_date))
}

/// O snapshot de aluguel é uma linha única compartilhada entre locações.
/// Ele só aparece no payload se pertence à locação atual: existe inquilino
/// ativo E o último reajuste não é anterior à entrada dele. Caso contrário o
/// inquilino novo veria o aluguel do anterior como se fosse o seu.
pub fn rental_info_visible(current: Option<&Tenant>, snapshot: &RateIncrease) -> bool {
    current.is_some_and(|t| snapshot.latest_rate_increase_date >= t.move_in_date)
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct PropertyService {
    repo: PropertyRepository,
    rates_repo: RatesRepository,
}

impl PropertyService {
    pub fn new(repo: PropertyRepository, rates_repo: RatesRepository) -> Self {
        Self { repo, rates_repo }
    }

    // -------------------------------------------------------------------------
    //  Imóveis
    // -------------------------------------------------------------------------

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
        self.repo
            .create_property(
                executor,
                property_address,
                key_number,
                service_type,
                strata_company,
                strata_contact_name,
                strata_phone,
            )
            .await
    }

    pub async fn list_properties<'e, E>(&self, executor: E) -> Result<Vec<Property>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_properties(executor).await
    }

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
        self.repo
            .update_property(
                executor,
                property_address,
                key_number,
                service_type,
                strata_company,
                strata_contact_name,
                strata_phone,
            )
            .await
    }

    pub async fn delete_property<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.delete_property(executor, property_address).await
    }

    /// Payload de detalhe: imóvel + proprietários + histórico de inquilinos +
    /// snapshot de aluguel (quando visível para a locação atual).
    pub async fn property_detail<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<PropertyDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Transação para um snapshot consistente das quatro leituras
        let mut tx = executor.begin().await?;

        let property = self
            .repo
            .find_by_address(&mut *tx, property_address)
            .await?
            .ok_or(AppError::PropertyNotFound)?;

        let owners = self.repo.list_owners(&mut *tx, property.id).await?;
        let tenants = self.repo.list_tenants(&mut *tx, property_address).await?;
        let snapshot = self.rates_repo.get_rate_record(&mut *tx, property_address).await?;

        tx.commit().await?;

        let current_tenant = select_current_tenant(&tenants).cloned();
        let rental_info =
            snapshot.filter(|s| rental_info_visible(current_tenant.as_ref(), s));

        Ok(PropertyDetail {
            property,
            owners,
            tenants,
            current_tenant,
            rental_info,
        })
    }

    // -------------------------------------------------------------------------
    //  Proprietários
    // -------------------------------------------------------------------------

    pub async fn create_owner<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        name: &str,
        contact_number: Option<&str>,
        birthday: Option<&str>,
        residential_address: Option<&str>,
    ) -> Result<Owner, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let birthday = CanonicalDate::normalize_opt(birthday)?.map(|d| d.as_naive());

        let mut tx = executor.begin().await?;

        let property = self
            .repo
            .find_by_address(&mut *tx, property_address)
            .await?
            .ok_or(AppError::PropertyNotFound)?;

        let owner = self
            .repo
            .create_owner(&mut *tx, property.id, name, contact_number, birthday, residential_address)
            .await?;

        tx.commit().await?;

        Ok(owner)
    }

    pub async fn list_owners<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<Vec<Owner>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let property = self
            .repo
            .find_by_address(&mut *tx, property_address)
            .await?
            .ok_or(AppError::PropertyNotFound)?;

        let owners = self.repo.list_owners(&mut *tx, property.id).await?;

        tx.commit().await?;

        Ok(owners)
    }

    pub async fn update_owner<'e, E>(
        &self,
        executor: E,
        owner_id: Uuid,
        name: &str,
        contact_number: Option<&str>,
        birthday: Option<&str>,
        residential_address: Option<&str>,
    ) -> Result<Owner, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let birthday = CanonicalDate::normalize_opt(birthday)?.map(|d| d.as_naive());

        self.repo
            .update_owner(executor, owner_id, name, contact_number, birthday, residential_address)
            .await
    }

    pub async fn delete_owner<'e, E>(&self, executor: E, owner_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.delete_owner(executor, owner_id).await
    }

    // -------------------------------------------------------------------------
    //  Inquilinos
    // -------------------------------------------------------------------------

    pub async fn create_tenant<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        name: &str,
        move_in_date: &str,
        move_out_date: Option<&str>,
        contact_number: Option<&str>,
        email: Option<&str>,
        birthday: Option<&str>,
        is_primary: bool,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let move_in = CanonicalDate::normalize(move_in_date)?.as_naive();
        let move_out = CanonicalDate::normalize_opt(move_out_date)?.map(|d| d.as_naive());
        let period = TenancyPeriod::new(move_in, move_out)?;
        let birthday = CanonicalDate::normalize_opt(birthday)?.map(|d| d.as_naive());

        let mut tx = executor.begin().await?;

        self.repo
            .find_by_address(&mut *tx, property_address)
            .await?
            .ok_or(AppError::PropertyNotFound)?;

        let tenant = self
            .repo
            .create_tenant(
                &mut *tx,
                property_address,
                name,
                period.move_in(),
                period.move_out(),
                contact_number,
                email,
                birthday,
                is_primary,
            )
            .await?;

        tx.commit().await?;

        Ok(tenant)
    }

    pub async fn list_tenants<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<Vec<Tenant>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_by_address(&mut *tx, property_address)
            .await?
            .ok_or(AppError::PropertyNotFound)?;

        let tenants = self.repo.list_tenants(&mut *tx, property_address).await?;

        tx.commit().await?;

        Ok(tenants)
    }

    /// Edição completa do cadastro do inquilino; a saída do imóvel é um
    /// update com `move_out_date` preenchida.
    pub async fn update_tenant<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        name: &str,
        move_in_date: &str,
        move_out_date: Option<&str>,
        contact_number: Option<&str>,
        email: Option<&str>,
        birthday: Option<&str>,
        is_primary: bool,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let move_in = CanonicalDate::normalize(move_in_date)?.as_naive();
        let move_out = CanonicalDate::normalize_opt(move_out_date)?.map(|d| d.as_naive());
        let period = TenancyPeriod::new(move_in, move_out)?;
        let birthday = CanonicalDate::normalize_opt(birthday)?.map(|d| d.as_naive());

        self.repo
            .update_tenant(
                executor,
                tenant_id,
                name,
                period.move_in(),
                period.move_out(),
                contact_number,
                email,
                birthday,
                is_primary,
            )
            .await
    }

    pub async fn delete_tenant<'e, E>(&self, executor: E, tenant_id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.delete_tenant(executor, tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tenant(name: &str, move_in: NaiveDate, move_out: Option<NaiveDate>, primary: bool) -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            property_address: "100 Test St".to_string(),
            name: name.to_string(),
            move_in_date: move_in,
            move_out_date: move_out,
            contact_number: None,
            email: None,
            birthday: None,
            is_primary: primary,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn snapshot(latest: NaiveDate) -> RateIncrease {
        RateIncrease {
            id: Uuid::new_v4(),
            property_address: "100 Test St".to_string(),
            latest_rate_increase_date: latest,
            latest_rental_rate: Decimal::from(2000),
            next_allowable_rental_increase_date: latest,
            next_allowable_rental_rate: Decimal::from(2060),
            reminder_date: latest,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn current_tenant_prefers_primary() {
        let tenants = vec![
            tenant("Recente", date(2023, 8, 1), None, false),
            tenant("Principal", date(2021, 1, 1), None, true),
        ];

        let current = select_current_tenant(&tenants).unwrap();
        assert_eq!(current.name, "Principal");
    }

    #[test]
    fn current_tenant_falls_back_to_latest_move_in() {
        let tenants = vec![
            tenant("Antigo", date(2020, 1, 1), None, false),
            tenant("Recente", date(2023, 8, 1), None, false),
            tenant("Saiu", date(2024, 1, 1), Some(date(2024, 6, 1)), true),
        ];

        // O principal já saiu, então não conta
        let current = select_current_tenant(&tenants).unwrap();
        assert_eq!(current.name, "Recente");
    }

    #[test]
    fn current_tenant_is_none_when_everyone_left() {
        let tenants = vec![tenant("Saiu", date(2020, 1, 1), Some(date(2022, 1, 1)), true)];
        assert!(select_current_tenant(&tenants).is_none());
        assert!(select_current_tenant(&[]).is_none());
    }

    #[test]
    fn rental_info_hidden_when_snapshot_predates_move_in() {
        // Snapshot de 2022 não pertence a quem entrou em junho/2023
        let t = tenant("Nova", date(2023, 6, 1), None, true);
        assert!(!rental_info_visible(Some(&t), &snapshot(date(2022, 1, 1))));
    }

    #[test]
    fn rental_info_visible_from_move_in_day_onward() {
        let t = tenant("Atual", date(2023, 6, 1), None, true);
        assert!(rental_info_visible(Some(&t), &snapshot(date(2023, 6, 1))));
        assert!(rental_info_visible(Some(&t), &snapshot(date(2024, 2, 1))));
    }

    #[test]
    fn rental_info_hidden_without_current_tenant() {
        assert!(!rental_info_visible(None, &snapshot(date(2023, 1, 1))));
    }
}
