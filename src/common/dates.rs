// src/common/dates.rs

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateError {
    #[error("Data vazia")]
    Empty,

    #[error("Data não reconhecida: '{0}'")]
    Unparseable(String),
}

/// Uma data de calendário ancorada ao meio-dia UTC.
///
/// Todas as datas que entram no sistema (formulários, timestamps de clientes
/// em fusos diferentes) passam por aqui antes de qualquer cálculo ou
/// gravação. A âncora no meio-dia evita que uma conversão de fuso empurre a
/// data para o dia anterior/seguinte, o que aconteceria com meia-noite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalDate(DateTime<Utc>);

impl CanonicalDate {
    pub fn from_naive(day: NaiveDate) -> Self {
        // 12:00:00 existe em qualquer dia de calendário
        Self(day.and_hms_opt(12, 0, 0).expect("meio-dia é sempre válido").and_utc())
    }

    /// Canonicaliza uma entrada heterogênea de data.
    ///
    /// - `YYYY-MM-DD` exato (10 caracteres, com '-') é lido como componentes
    ///   de calendário, nunca como timestamp;
    /// - qualquer outra string passa pelo parse genérico (RFC 3339 e
    ///   variantes sem offset) e só o dia de calendário do resultado é
    ///   aproveitado;
    /// - entrada irreconhecível falha com `DateError::Unparseable`.
    pub fn normalize(input: &str) -> Result<Self, DateError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DateError::Empty);
        }

        // Caminho rápido: o formato de armazenamento do próprio app
        if trimmed.len() == 10 && trimmed.contains('-') {
            if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                return Ok(Self::from_naive(day));
            }
        }

        // Parse genérico: extraímos o dia de calendário do timestamp
        // no offset em que ele foi escrito, não convertido para UTC
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_naive(dt.date_naive()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return Ok(Self::from_naive(dt.date()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Ok(Self::from_naive(dt.date()));
        }

        Err(DateError::Unparseable(input.to_string()))
    }

    /// `None`/string vazia viram `Ok(None)`; o resto segue `normalize`.
    pub fn normalize_opt(input: Option<&str>) -> Result<Option<Self>, DateError> {
        match input {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => Self::normalize(s).map(Some),
        }
    }

    /// Formato de armazenamento `YYYY-MM-DD`, lido dos campos UTC.
    pub fn storage_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Soma de meses de calendário, com clamp no fim do mês
    /// (31/jan + 1 mês = 28/fev ou 29/fev). Semântica do chrono `Months`.
    pub fn add_months(&self, months: u32) -> Self {
        let day = self
            .as_naive()
            .checked_add_months(Months::new(months))
            .expect("data fora do intervalo suportado pelo chrono");
        Self::from_naive(day)
    }
}

/// Meses de calendário inteiros entre duas datas (ex.: 15/jan → 14/mar = 1).
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalize_anchors_plain_date_at_utc_noon() {
        let canonical = CanonicalDate::normalize("2023-06-01").unwrap();
        assert_eq!(canonical.as_naive(), date(2023, 6, 1));
        assert_eq!(canonical.0.hour(), 12);
        assert_eq!(canonical.0.minute(), 0);
    }

    #[test]
    fn normalize_round_trips_storage_strings() {
        for s in ["2023-01-01", "2024-02-29", "1999-12-31", "2023-09-05"] {
            let canonical = CanonicalDate::normalize(s).unwrap();
            assert_eq!(canonical.storage_string(), s);
        }
    }

    #[test]
    fn normalize_keeps_calendar_day_of_offset_timestamps() {
        // 23h em Vancouver (-08:00) ainda é dia 15 lá, mesmo sendo dia 16 em UTC
        let canonical = CanonicalDate::normalize("2023-01-15T23:30:00-08:00").unwrap();
        assert_eq!(canonical.storage_string(), "2023-01-15");
    }

    #[test]
    fn normalize_accepts_datetime_without_offset() {
        let canonical = CanonicalDate::normalize("2023-01-15T08:00:00").unwrap();
        assert_eq!(canonical.storage_string(), "2023-01-15");

        let canonical = CanonicalDate::normalize("2023-01-15 08:00:00").unwrap();
        assert_eq!(canonical.storage_string(), "2023-01-15");
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(matches!(
            CanonicalDate::normalize("amanhã"),
            Err(DateError::Unparseable(_))
        ));
        assert!(matches!(
            CanonicalDate::normalize("2023-13-45"),
            Err(DateError::Unparseable(_))
        ));
        assert!(matches!(CanonicalDate::normalize("   "), Err(DateError::Empty)));
    }

    #[test]
    fn normalize_opt_treats_empty_as_none() {
        assert!(CanonicalDate::normalize_opt(None).unwrap().is_none());
        assert!(CanonicalDate::normalize_opt(Some("")).unwrap().is_none());
        assert!(CanonicalDate::normalize_opt(Some("2023-06-01")).unwrap().is_some());
    }

    #[test]
    fn add_months_keeps_day_of_month() {
        let d = CanonicalDate::normalize("2023-01-15").unwrap();
        assert_eq!(d.add_months(12).storage_string(), "2024-01-15");
        assert_eq!(d.add_months(8).storage_string(), "2023-09-15");
    }

    #[test]
    fn add_months_clamps_at_end_of_month() {
        // Comportamento documentado do chrono Months: 31/jan + 1 mês = 28/fev
        let d = CanonicalDate::normalize("2023-01-31").unwrap();
        assert_eq!(d.add_months(1).storage_string(), "2023-02-28");

        // Ano bissexto: 29/fev + 12 meses cai em 28/fev do ano seguinte
        let leap = CanonicalDate::normalize("2024-02-29").unwrap();
        assert_eq!(leap.add_months(12).storage_string(), "2025-02-28");
    }

    #[test]
    fn whole_months_counts_complete_months_only() {
        assert_eq!(whole_months_between(date(2023, 1, 15), date(2023, 1, 15)), 0);
        assert_eq!(whole_months_between(date(2023, 1, 15), date(2023, 2, 14)), 0);
        assert_eq!(whole_months_between(date(2023, 1, 15), date(2023, 2, 15)), 1);
        assert_eq!(whole_months_between(date(2023, 1, 15), date(2024, 1, 15)), 12);
        assert_eq!(whole_months_between(date(2022, 11, 30), date(2023, 3, 1)), 3);
    }
}
