// src/services/rate_service.rs

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::{dates::CanonicalDate, error::AppError},
    db::{rates_repo::RateSnapshotFields, PropertyRepository, RatesRepository},
    models::{
        property::Tenant,
        rates::{RateHistory, RateHistoryEntry, RateIncrease},
    },
    services::property_service::select_current_tenant,
};

/// Criação estrita ou sobrescrita ("novo inquilino, novo aluguel inicial").
/// As duas intenções existem no produto; aqui cada rota escolhe a sua
/// explicitamente em vez de depender de checagens de existência espalhadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateMode {
    Create,
    Overwrite,
}

// =============================================================================
//  FÓRMULAS (puras, testadas abaixo)
// =============================================================================

// Teto legal de reajuste anual: 3%
fn increase_multiplier() -> Decimal {
    Decimal::new(103, 2) // 1.03
}

/// `round(rate * 1.03, 2)`, com o meio arredondado para longe do zero.
pub fn next_allowable_rate(rate: Decimal) -> Decimal {
    (rate * increase_multiplier()).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Snapshot completo derivado de uma data de vigência e um valor:
/// próximo reajuste permitido em +12 meses, lembrete em +8 meses.
pub fn compute_snapshot(effective: CanonicalDate, rate: Decimal) -> RateSnapshotFields {
    RateSnapshotFields {
        latest_rate_increase_date: effective.as_naive(),
        latest_rental_rate: rate,
        next_allowable_rental_increase_date: effective.add_months(12).as_naive(),
        next_allowable_rental_rate: next_allowable_rate(rate),
        reminder_date: effective.add_months(8).as_naive(),
    }
}

/// Percentual de aumento para exibição. `previous = 0` é a sentinela de
/// "sem aluguel anterior": devolve None em vez de dividir por zero.
pub fn percent_increase(previous: Decimal, new: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    let percent = (new - previous) / previous * Decimal::ONE_HUNDRED;
    Some(percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Nomes dos inquilinos ativos na data do reajuste, principal primeiro,
/// separados por vírgula. Gravado no histórico para auditoria futura.
pub fn active_tenants_note(tenants: &[Tenant], as_of: NaiveDate) -> String {
    let mut active: Vec<&Tenant> = tenants.iter().filter(|t| t.is_active_on(as_of)).collect();
    if active.is_empty() {
        return "No active tenants".to_string();
    }
    active.sort_by(|a, b| {
        b.is_primary
            .cmp(&a.is_primary)
            .then(b.move_in_date.cmp(&a.move_in_date))
    });
    active
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn compose_increase_notes(user_notes: Option<&str>, tenant_note: &str) -> String {
    match user_notes.map(str::trim) {
        Some(n) if !n.is_empty() => format!("{} - Tenants: {}", n, tenant_note),
        _ => format!("Tenants: {}", tenant_note),
    }
}

// =============================================================================
//  SERVIÇO
// =============================================================================

#[derive(Clone)]
pub struct RateService {
    rates_repo: RatesRepository,
    property_repo: PropertyRepository,
}

impl RateService {
    pub fn new(rates_repo: RatesRepository, property_repo: PropertyRepository) -> Self {
        Self { rates_repo, property_repo }
    }

    /// Registra o aluguel inicial de um imóvel.
    ///
    /// `RateMode::Create` falha se já houver snapshot; `RateMode::Overwrite`
    /// zera o registro no lugar (novo inquilino). Snapshot + histórico saem
    /// na mesma transação: ou os dois entram, ou nenhum.
    pub async fn set_initial_rate<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        rate: Decimal,
        start_date: &str,
        mode: RateMode,
    ) -> Result<RateIncrease, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if rate <= Decimal::ZERO {
            return Err(AppError::InvalidRate);
        }
        let effective = CanonicalDate::normalize(start_date)?;

        let mut tx = executor.begin().await?;

        self.property_repo
            .find_by_address(&mut *tx, property_address)
            .await?
            .ok_or(AppError::PropertyNotFound)?;

        let fields = compute_snapshot(effective, rate);

        let record = match mode {
            RateMode::Create => {
                self.rates_repo
                    .insert_rate_record(&mut *tx, property_address, &fields)
                    .await?
            }
            RateMode::Overwrite => {
                self.rates_repo
                    .upsert_rate_record(&mut *tx, property_address, &fields)
                    .await?
            }
        };

        // Sentinela previous_rate = 0: não havia aluguel anterior
        let tenants = self.property_repo.list_tenants(&mut *tx, property_address).await?;
        let notes = match select_current_tenant(&tenants) {
            Some(t) => format!("Initial rental rate - tenant: {}", t.name),
            None => "Initial rental rate".to_string(),
        };
        self.rates_repo
            .append_rate_history(
                &mut *tx,
                property_address,
                effective.as_naive(),
                Decimal::ZERO,
                rate,
                Some(&notes),
            )
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Processa um reajuste sobre um registro existente.
    ///
    /// O histórico guarda o valor antigo como `previous_rate` e a lista de
    /// inquilinos ativos na data; só então o snapshot é sobrescrito.
    pub async fn process_increase<'e, E>(
        &self,
        executor: E,
        property_address: &str,
        increase_date: &str,
        new_rate: Decimal,
        user_notes: Option<&str>,
    ) -> Result<RateIncrease, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if new_rate <= Decimal::ZERO {
            return Err(AppError::InvalidRate);
        }
        let effective = CanonicalDate::normalize(increase_date)?;

        let mut tx = executor.begin().await?;

        let current = self
            .rates_repo
            .get_rate_record(&mut *tx, property_address)
            .await?
            .ok_or(AppError::NoRateRecord)?;

        let tenants = self.property_repo.list_tenants(&mut *tx, property_address).await?;
        let tenant_note = active_tenants_note(&tenants, effective.as_naive());
        let notes = compose_increase_notes(user_notes, &tenant_note);

        self.rates_repo
            .append_rate_history(
                &mut *tx,
                property_address,
                effective.as_naive(),
                current.latest_rental_rate,
                new_rate,
                Some(&notes),
            )
            .await?;

        let fields = compute_snapshot(effective, new_rate);
        let record = self
            .rates_repo
            .upsert_rate_record(&mut *tx, property_address, &fields)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Histórico do imóvel com o percentual de cada reajuste calculado.
    pub async fn rate_history<'e, E>(
        &self,
        executor: E,
        property_address: &str,
    ) -> Result<Vec<RateHistoryEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.property_repo
            .find_by_address(&mut *tx, property_address)
            .await?
            .ok_or(AppError::PropertyNotFound)?;

        let rows = self.rates_repo.list_rate_history(&mut *tx, property_address).await?;

        tx.commit().await?;

        Ok(rows.into_iter().map(history_entry).collect())
    }
}

fn history_entry(row: RateHistory) -> RateHistoryEntry {
    let percent = percent_increase(row.previous_rate, row.new_rate);
    RateHistoryEntry {
        id: row.id,
        increase_date: row.increase_date,
        previous_rate: row.previous_rate,
        new_rate: row.new_rate,
        percent_increase: percent,
        notes: row.notes,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

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

    #[test]
    fn next_allowable_rate_applies_three_percent() {
        assert_eq!(next_allowable_rate(dec("2500")), dec("2575.00"));
        assert_eq!(next_allowable_rate(dec("1850")), dec("1905.50"));
        assert_eq!(next_allowable_rate(dec("2000")), dec("2060"));
    }

    #[test]
    fn snapshot_uses_twelve_and_eight_month_offsets() {
        let effective = CanonicalDate::normalize("2023-01-15").unwrap();
        let fields = compute_snapshot(effective, dec("1850"));

        assert_eq!(fields.latest_rate_increase_date, date(2023, 1, 15));
        assert_eq!(fields.next_allowable_rental_increase_date, date(2024, 1, 15));
        assert_eq!(fields.reminder_date, date(2023, 9, 15));
        assert_eq!(fields.next_allowable_rental_rate, dec("1905.50"));
    }

    #[test]
    fn snapshot_matches_initial_rate_scenario() {
        // Cadastro inicial: 2000 em 2023-01-01
        let effective = CanonicalDate::normalize("2023-01-01").unwrap();
        let fields = compute_snapshot(effective, dec("2000"));

        assert_eq!(fields.latest_rental_rate, dec("2000"));
        assert_eq!(fields.next_allowable_rental_increase_date, date(2024, 1, 1));
        assert_eq!(fields.next_allowable_rental_rate, dec("2060"));
        assert_eq!(fields.reminder_date, date(2023, 9, 1));
    }

    #[test]
    fn snapshot_clamps_end_of_month() {
        let effective = CanonicalDate::normalize("2023-10-31").unwrap();
        let fields = compute_snapshot(effective, dec("2200"));

        // 31/out + 8 meses cai em 30/jun (junho tem 30 dias)
        assert_eq!(fields.reminder_date, date(2024, 6, 30));
        assert_eq!(fields.next_allowable_rental_increase_date, date(2024, 10, 31));
    }

    #[test]
    fn percent_increase_guards_zero_previous() {
        assert_eq!(percent_increase(Decimal::ZERO, dec("2000")), None);
        assert_eq!(percent_increase(dec("1850"), dec("1900")), Some(dec("2.70")));
        assert_eq!(percent_increase(dec("2000"), dec("2060")), Some(dec("3.00")));
    }

    #[test]
    fn note_lists_active_tenants_primary_first() {
        let tenants = vec![
            tenant("Bruno", date(2022, 3, 1), None, false),
            tenant("Alice", date(2021, 7, 1), None, true),
            tenant("Carla", date(2019, 1, 1), Some(date(2021, 6, 30)), false),
        ];

        let note = active_tenants_note(&tenants, date(2023, 5, 10));
        assert_eq!(note, "Alice, Bruno");
    }

    #[test]
    fn note_respects_move_boundaries() {
        // Saída no próprio dia já não conta; entrada no próprio dia conta
        let tenants = vec![
            tenant("Saiu", date(2020, 1, 1), Some(date(2023, 5, 10)), false),
            tenant("Entrou", date(2023, 5, 10), None, false),
        ];

        assert_eq!(active_tenants_note(&tenants, date(2023, 5, 10)), "Entrou");
    }

    #[test]
    fn note_falls_back_when_nobody_is_active() {
        let tenants = vec![tenant("Antiga", date(2019, 1, 1), Some(date(2020, 1, 1)), true)];
        assert_eq!(active_tenants_note(&tenants, date(2023, 5, 10)), "No active tenants");
        assert_eq!(active_tenants_note(&[], date(2023, 5, 10)), "No active tenants");
    }

    #[test]
    fn increase_notes_keep_user_text_in_front() {
        assert_eq!(
            compose_increase_notes(Some("Reforma da cozinha"), "Alice"),
            "Reforma da cozinha - Tenants: Alice"
        );
        assert_eq!(compose_increase_notes(None, "No active tenants"), "Tenants: No active tenants");
        assert_eq!(compose_increase_notes(Some("   "), "Alice"), "Tenants: Alice");
    }

    #[test]
    fn history_entry_carries_percent() {
        let row = RateHistory {
            id: Uuid::new_v4(),
            property_address: "100 Test St".to_string(),
            increase_date: date(2024, 1, 1),
            previous_rate: dec("1850"),
            new_rate: dec("1900"),
            notes: None,
            created_at: Utc::now(),
        };

        let entry = history_entry(row);
        assert_eq!(entry.percent_increase, Some(dec("2.70")));
        assert_eq!(entry.previous_rate, dec("1850"));
        assert_eq!(entry.new_rate, dec("1900"));
    }
}
