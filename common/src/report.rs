//! Сводный отчёт по пармастерам

use crate::cauldron::{cauldron_share, cauldron_unit};
use crate::compensation::{dedup_details, DetailRow, Parmaster};
use rust_decimal::Decimal;

/// Строка листа «Отчет»
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub name: String,
    pub rank: String,
    pub base_salary: Decimal,
    pub stake: Decimal,
    pub collective_sum: Decimal,
    pub collective_count: u32,
    pub individual_count: u32,
    pub individual_sum: Decimal,
    pub company_count: u32,
    pub company_sum: Decimal,
    pub cauldron: Decimal,
    pub total: Decimal,
    pub session_count: u32,
}

/// Заголовки листа «Отчет» в порядке столбцов
pub const REPORT_HEADERS: [&str; 13] = [
    "Имя",
    "Ставка",
    "Ставка р.",
    "Ставка р. (за все смены)",
    "(сумма) Коллективное парение",
    "(кол-во) Коллективное парение",
    "(кол-во) Парение авторское",
    "(сумма) Парение авторское",
    "(кол-во) Парение коллективное авторское",
    "(сумма) Парение коллективное авторское",
    "Котёл",
    "Итого",
    "Кол-во пар",
];

/// Заголовки листа «Все процедуры»
pub const DETAIL_HEADERS: [&str; 4] = ["Имя", "Тип процедуры", "Количество", "Зарплата за процедуру"];

pub const REPORT_SHEET: &str = "Отчет";
pub const DETAIL_SHEET: &str = "Все процедуры";

impl ReportRow {
    pub fn new(parmaster: &Parmaster<'_>, cauldron_unit: Decimal) -> Self {
        let author = parmaster.calculate_author_procedures();
        let collective = parmaster.calculate_collective_procedures();
        let cauldron = cauldron_share(cauldron_unit, parmaster);

        Self {
            name: parmaster.name.clone(),
            rank: parmaster.rank.label().to_string(),
            base_salary: parmaster.base_salary(),
            stake: parmaster.calculated_stake,
            collective_sum: collective.earnings,
            collective_count: collective.count,
            individual_count: author.individual.count,
            individual_sum: author.individual.earnings,
            company_count: author.company.count,
            company_sum: author.company.earnings,
            cauldron,
            total: parmaster.calculate_salary().total + cauldron,
            session_count: parmaster
                .shifts
                .saturating_add(author.individual.count)
                .saturating_add(author.company.count),
        }
    }
}

/// Готовый отчёт: сводка и детализация
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollReport {
    pub cauldron_unit: Decimal,
    pub rows: Vec<ReportRow>,
    pub details: Vec<DetailRow>,
}

/// Собрать отчёт по всем пармастерам
pub fn build_report(parmasters: &[Parmaster<'_>], reported_total: Decimal) -> PayrollReport {
    let unit = cauldron_unit(reported_total, parmasters);
    let rows = parmasters.iter().map(|p| ReportRow::new(p, unit)).collect();
    let details = dedup_details(
        parmasters
            .iter()
            .flat_map(|p| p.calculate_detailed_procedures()),
    );

    PayrollReport {
        cauldron_unit: unit,
        rows,
        details,
    }
}
