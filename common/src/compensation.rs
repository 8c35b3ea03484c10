//! Расчёт зарплаты пармастера
//!
//! ## Состав зарплаты
//! - ставка: оклад × число смен по табелю
//! - авторские и коллективные процедуры × процент ставки
//!   (у стажёра процент 0 — процедуры идут без умножения)
//! - процент «не автора»: 10% от чужих авторских процедур той категории,
//!   в которой сотрудник сам не встречается
//! - доля котла считается отдельно, см. `cauldron`

use crate::roster::matched_shift_count;
use crate::types::{
    AuthoredCategory, AuthoredProcedures, AuthoredRecord, CollectiveProcedures, Rank, RosterEntry,
    ShiftTally,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;

/// Повторный коэффициент к авторскому парению в отчётной колонке
pub const INDIVIDUAL_REPORT_FACTOR: Decimal = dec!(0.3);
/// Доля «не автора» от чужой авторской процедуры
pub const REFERRAL_FACTOR: Decimal = dec!(0.1);

/// Количество и сумма по виду процедур
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcedureTally {
    pub count: u32,
    pub earnings: Decimal,
}

/// Итоги по авторским процедурам
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthoredTotals {
    /// Парение авторское
    pub individual: ProcedureTally,
    /// Коллективное парение для компании
    pub company: ProcedureTally,
}

/// Итог зарплаты
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryTotals {
    pub total: Decimal,
    /// Процедуры без процента ставки, плюс ставка; без процента «не автора»
    pub without_percentage: Decimal,
}

/// Строка детализации процедур
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailRow {
    pub name: String,
    pub procedure_type: String,
    pub quantity: u32,
    pub value: Decimal,
}

/// Убрать повторы, сохранив порядок первого появления
pub fn dedup_details(rows: impl IntoIterator<Item = DetailRow>) -> Vec<DetailRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

/// Пармастер с уже назначенной ставкой
#[derive(Debug, Clone)]
pub struct Parmaster<'a> {
    pub name: String,
    pub rank: Rank,
    authored: &'a AuthoredProcedures,
    collective: &'a CollectiveProcedures,
    pub calculated_stake: Decimal,
    pub matched_shifts: u32,
    pub shifts: u32,
}

impl<'a> Parmaster<'a> {
    pub fn new(
        entry: RosterEntry,
        authored: &'a AuthoredProcedures,
        collective: &'a CollectiveProcedures,
        tally: &ShiftTally,
    ) -> Self {
        let matched_shifts = match matched_shift_count(tally, &entry.staff_name) {
            Some((key, count)) => {
                tracing::debug!("{} ↔ табель «{}»: {} смен", entry.staff_name, key, count);
                count
            }
            None => {
                tracing::debug!("{} не найден в табеле", entry.staff_name);
                0
            }
        };

        let mut parmaster = Self {
            name: entry.staff_name,
            rank: entry.rank,
            authored,
            collective,
            calculated_stake: entry.rank.base_salary() * Decimal::from(matched_shifts),
            matched_shifts,
            shifts: 0,
        };
        let author = parmaster.calculate_author_procedures();
        parmaster.shifts = matched_shifts
            .saturating_add(author.individual.count)
            .saturating_add(author.company.count)
            .saturating_add(parmaster.calculate_collective_procedures().count);
        parmaster
    }

    pub fn base_salary(&self) -> Decimal {
        self.rank.base_salary()
    }

    pub fn procedure_percentage(&self) -> Decimal {
        self.rank.procedure_percentage()
    }

    fn own_records(&self, category: AuthoredCategory) -> impl Iterator<Item = &'a AuthoredRecord> + '_ {
        let name = self.name.as_str();
        self.authored
            .get(&category)
            .into_iter()
            .flatten()
            .filter(move |record| record.staff_name == name)
    }

    /// Ставка за смены и число смен по табелю
    pub fn calculate_stake(&self) -> (Decimal, u32) {
        (self.calculated_stake, self.matched_shifts)
    }

    /// Авторские процедуры сотрудника по категориям.
    ///
    /// Сумма авторского парения умножается на 0.3 ещё раз, хотя
    /// `computed_value` уже содержит долю категории.
    pub fn calculate_author_procedures(&self) -> AuthoredTotals {
        let tally = |category: AuthoredCategory| {
            self.own_records(category)
                .fold(ProcedureTally::default(), |acc, record| ProcedureTally {
                    count: acc.count.saturating_add(record.quantity),
                    earnings: acc.earnings + record.computed_value,
                })
        };

        let mut individual = tally(AuthoredCategory::Individual);
        individual.earnings *= INDIVIDUAL_REPORT_FACTOR;

        AuthoredTotals {
            individual,
            company: tally(AuthoredCategory::CompanyCollective),
        }
    }

    /// Коллективные процедуры сотрудника (только группы с типом)
    pub fn calculate_collective_procedures(&self) -> ProcedureTally {
        let mut result = ProcedureTally::default();
        for (label, entries) in self.collective.categorized() {
            let price = crate::types::collective_unit_price(label);
            for entry in entries.iter().filter(|e| e.staff_name == self.name) {
                result.count = result.count.saturating_add(entry.quantity);
                result.earnings += price * Decimal::from(entry.quantity);
            }
        }
        result
    }

    /// Процент «не автора»
    pub fn calculate_author_percentage(&self) -> Decimal {
        let mut percentage = Decimal::ZERO;
        for records in self.authored.values() {
            if records.iter().any(|record| record.staff_name == self.name) {
                continue;
            }
            percentage += records
                .iter()
                .map(|record| record.computed_value * REFERRAL_FACTOR)
                .sum::<Decimal>();
        }
        percentage
    }

    /// Зарплата без котла
    pub fn calculate_salary(&self) -> SalaryTotals {
        let authored_earnings: Decimal = AuthoredCategory::ALL
            .into_iter()
            .flat_map(|category| self.own_records(category))
            .map(|record| record.computed_value)
            .sum();
        let procedures = authored_earnings + self.calculate_collective_procedures().earnings;

        let percentage = self.procedure_percentage();
        let scaled = if percentage.is_zero() {
            procedures
        } else {
            procedures * percentage
        };

        SalaryTotals {
            total: scaled + self.calculated_stake + self.calculate_author_percentage(),
            without_percentage: procedures + self.calculated_stake,
        }
    }

    /// Детализация процедур для листа «Все процедуры»
    pub fn calculate_detailed_procedures(&self) -> Vec<DetailRow> {
        detailed_procedures(self.authored, self.collective)
    }
}

/// Все авторские и коллективные (с типом) процедуры без повторов,
/// включая сотрудников, которых нет в ростере
pub fn detailed_procedures(
    authored: &AuthoredProcedures,
    collective: &CollectiveProcedures,
) -> Vec<DetailRow> {
    let authored_rows = authored.iter().flat_map(|(category, records)| {
        records.iter().map(move |record| DetailRow {
            name: record.staff_name.clone(),
            procedure_type: category.label().to_string(),
            quantity: record.quantity,
            value: record.computed_value,
        })
    });

    let collective_rows = collective.categorized().flat_map(|(label, entries)| {
        let price = crate::types::collective_unit_price(label);
        entries.iter().map(move |entry| DetailRow {
            name: entry.staff_name.clone(),
            procedure_type: label.to_string(),
            quantity: entry.quantity,
            value: price * Decimal::from(entry.quantity),
        })
    });

    dedup_details(authored_rows.chain(collective_rows))
}

/// Собрать пармастеров по ростеру
pub fn build_parmasters<'a>(
    roster: Vec<RosterEntry>,
    authored: &'a AuthoredProcedures,
    collective: &'a CollectiveProcedures,
    tally: &ShiftTally,
) -> Vec<Parmaster<'a>> {
    roster
        .into_iter()
        .map(|entry| Parmaster::new(entry, authored, collective, tally))
        .collect()
}
