// src/services/reminder_service.rs

use chrono::{Datelike, NaiveDate};
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::{dates::whole_months_between, error::AppError},
    db::{PropertyRepository, RatesRepository},
    models::{
        property::Tenant,
        rates::RateIncrease,
        reminders::{BirthdayReminderEntry, ContactRole, OwnerBirthdayRow, RateReminderEntry},
    },
};

// =============================================================================
//  CONSTRUÇÃO DAS LISTAS (pura, testada abaixo)
// =============================================================================

/// Lembretes de reajuste: um por snapshot, com filtros opcionais por mês do
/// lembrete e por mínimo de meses desde o último reajuste. Mais atrasado
/// primeiro.
pub fn build_rate_reminders(
    records: Vec<RateIncrease>,
    today: NaiveDate,
    reminder_month: Option<u32>,
    min_months: Option<i32>,
) -> Vec<RateReminderEntry> {
    let mut entries: Vec<RateReminderEntry> = records
        .into_iter()
        .filter(|r| reminder_month.is_none_or(|m| r.reminder_date.month() == m))
        .map(|r| {
            let months = whole_months_between(r.latest_rate_increase_date, today);
            RateReminderEntry {
                property_address: r.property_address,
                latest_rate_increase_date: r.latest_rate_increase_date,
                latest_rental_rate: r.latest_rental_rate,
                next_allowable_rental_increase_date: r.next_allowable_rental_increase_date,
                next_allowable_rental_rate: r.next_allowable_rental_rate,
                reminder_date: r.reminder_date,
                months_since_increase: months,
            }
        })
        .filter(|e| min_months.is_none_or(|min| e.months_since_increase >= min))
        .collect();

    entries.sort_by(|a, b| {
        b.months_since_increase
            .cmp(&a.months_since_increase)
            .then_with(|| a.property_address.cmp(&b.property_address))
    });

    entries
}

/// Aniversários do mês: proprietários + inquilinos ativos, por dia crescente.
/// Só igualdade de mês; o ano não entra na conta.
pub fn build_birthday_reminders(
    owners: Vec<OwnerBirthdayRow>,
    active_tenants: Vec<Tenant>,
    target_month: u32,
) -> Vec<BirthdayReminderEntry> {
    let mut entries: Vec<BirthdayReminderEntry> = Vec::new();

    for row in owners {
        if row.birthday.month() == target_month {
            entries.push(BirthdayReminderEntry {
                name: row.name,
                role: ContactRole::Owner,
                property_address: row.property_address,
                birthday: row.birthday,
            });
        }
    }

    for tenant in active_tenants {
        if let Some(birthday) = tenant.birthday {
            if birthday.month() == target_month {
                entries.push(BirthdayReminderEntry {
                    name: tenant.name,
                    role: ContactRole::Tenant,
                    property_address: tenant.property_address,
                    birthday,
                });
            }
        }
    }

    entries.sort_by(|a, b| {
        a.birthday
            .day()
            .cmp(&b.birthday.day())
            .then_with(|| a.name.cmp(&b.name))
    });

    entries
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct ReminderService {
    rates_repo: RatesRepository,
    property_repo: PropertyRepository,
}

impl ReminderService {
    pub fn new(rates_repo: RatesRepository, property_repo: PropertyRepository) -> Self {
        Self { rates_repo, property_repo }
    }

    pub async fn rate_reminders<'e, E>(
        &self,
        executor: E,
        today: NaiveDate,
        reminder_month: Option<u32>,
        min_months: Option<i32>,
    ) -> Result<Vec<RateReminderEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let records = self.rates_repo.list_rate_records(executor).await?;
        Ok(build_rate_reminders(records, today, reminder_month, min_months))
    }

    pub async fn birthday_reminders<'e, E>(
        &self,
        executor: E,
        target_month: u32,
    ) -> Result<Vec<BirthdayReminderEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let owners = self.property_repo.list_owners_with_birthday(&mut *tx).await?;
        let tenants = self.property_repo.list_active_tenants(&mut *tx).await?;

        tx.commit().await?;

        Ok(build_birthday_reminders(owners, tenants, target_month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(address: &str, latest: NaiveDate) -> RateIncrease {
        RateIncrease {
            id: Uuid::new_v4(),
            property_address: address.to_string(),
            latest_rate_increase_date: latest,
            latest_rental_rate: Decimal::from(2000),
            next_allowable_rental_increase_date: latest,
            next_allowable_rental_rate: Decimal::from(2060),
            reminder_date: date(latest.year(), 9, 1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tenant(name: &str, birthday: Option<NaiveDate>, move_out: Option<NaiveDate>) -> Tenant {
        Tenant {
            id: Uuid::new_v4(),
            property_address: "100 Test St".to_string(),
            name: name.to_string(),
            move_in_date: date(2022, 1, 1),
            move_out_date: move_out,
            contact_number: None,
            email: None,
            birthday,
            is_primary: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn owner(name: &str, birthday: NaiveDate) -> OwnerBirthdayRow {
        OwnerBirthdayRow {
            name: name.to_string(),
            birthday,
            property_address: "200 Oak Ave".to_string(),
        }
    }

    #[test]
    fn rate_reminders_sort_longest_overdue_first() {
        let records = vec![
            record("A", date(2023, 6, 1)),
            record("B", date(2022, 1, 1)),
            record("C", date(2023, 1, 1)),
        ];

        let entries = build_rate_reminders(records, date(2024, 1, 1), None, None);
        let order: Vec<&str> = entries.iter().map(|e| e.property_address.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(entries[0].months_since_increase, 24);
        assert_eq!(entries[1].months_since_increase, 12);
        assert_eq!(entries[2].months_since_increase, 7);
    }

    #[test]
    fn rate_reminders_apply_min_months_threshold() {
        let records = vec![
            record("A", date(2023, 6, 1)),
            record("B", date(2022, 1, 1)),
        ];

        let entries = build_rate_reminders(records, date(2024, 1, 1), None, Some(12));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].property_address, "B");
    }

    #[test]
    fn rate_reminders_filter_by_reminder_month() {
        let mut september = record("A", date(2023, 1, 1));
        september.reminder_date = date(2023, 9, 1);
        let mut november = record("B", date(2023, 3, 1));
        november.reminder_date = date(2023, 11, 1);

        let entries = build_rate_reminders(vec![september, november], date(2024, 1, 1), Some(9), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].property_address, "A");
    }

    #[test]
    fn birthday_reminders_match_month_and_sort_by_day() {
        let owners = vec![
            owner("Zeca", date(1960, 5, 25)),
            owner("Ana", date(1975, 3, 10)),
        ];
        let tenants = vec![
            tenant("Maria", Some(date(1990, 5, 20)), None),
            tenant("Pedro", Some(date(1988, 5, 2)), None),
            tenant("Sem aniversário", None, None),
        ];

        let entries = build_birthday_reminders(owners, tenants, 5);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Pedro", "Maria", "Zeca"]);
        assert_eq!(entries[2].role, ContactRole::Owner);
    }

    #[test]
    fn birthday_reminders_ignore_other_months() {
        let owners = vec![owner("Ana", date(1975, 3, 10))];
        let entries = build_birthday_reminders(owners, vec![], 5);
        assert!(entries.is_empty());
    }
}
