//! Типы предметной области
//!
//! - Rank: ставка пармастера (оклад и процент от процедур)
//! - AuthoredRecord: авторская процедура
//! - CollectiveEntry / ProcedureGroup: коллективные процедуры по типам
//! - ShiftTally: количество смен по табелю

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ставка пармастера
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    Intern,
    Junior,
    Senior,
    Head,
}

impl Rank {
    /// Все ставки в порядке возрастания (для выбора в консоли)
    pub const ALL: [Rank; 4] = [Rank::Intern, Rank::Junior, Rank::Senior, Rank::Head];

    /// Название ставки, как в ведомости
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Intern => "стажер",
            Rank::Junior => "младший мастер",
            Rank::Senior => "мастер",
            Rank::Head => "старший мастер",
        }
    }

    /// Оклад за одну смену
    pub fn base_salary(&self) -> Decimal {
        match self {
            Rank::Intern => dec!(1000),
            Rank::Junior => dec!(1200),
            Rank::Senior => dec!(1500),
            Rank::Head => dec!(2000),
        }
    }

    /// Доля от стоимости процедур
    pub fn procedure_percentage(&self) -> Decimal {
        match self {
            Rank::Intern => Decimal::ZERO,
            Rank::Junior => dec!(0.25),
            Rank::Senior => dec!(0.30),
            Rank::Head => dec!(0.35),
        }
    }

    pub fn is_intern(&self) -> bool {
        matches!(self, Rank::Intern)
    }
}

impl std::str::FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('ё', "е");
        match normalized.as_str() {
            "стажер" | "intern" => Ok(Rank::Intern),
            "младший мастер" | "junior" => Ok(Rank::Junior),
            "мастер" | "senior" => Ok(Rank::Senior),
            "старший мастер" | "head" => Ok(Rank::Head),
            _ => Err(Error::UnknownRank(s.to_string())),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<String> for Rank {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.label().to_string()
    }
}

/// Категория авторских процедур
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AuthoredCategory {
    /// Коллективное парение для компании (35%)
    CompanyCollective,
    /// Парение авторское (30%)
    Individual,
}

impl AuthoredCategory {
    pub const ALL: [AuthoredCategory; 2] =
        [AuthoredCategory::CompanyCollective, AuthoredCategory::Individual];

    pub fn label(&self) -> &'static str {
        match self {
            AuthoredCategory::CompanyCollective => "Коллективное парение для компании",
            AuthoredCategory::Individual => "Парение авторское",
        }
    }

    /// Доля от заявленной цены, которая идёт в `computed_value`
    pub fn factor(&self) -> Decimal {
        match self {
            AuthoredCategory::CompanyCollective => dec!(0.35),
            AuthoredCategory::Individual => dec!(0.30),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label.trim())
    }
}

/// Авторская процедура
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredRecord {
    pub staff_name: String,
    pub quantity: u32,
    /// Цена × доля категории, округлено до копеек (не зависит от ставки)
    pub computed_value: Decimal,
}

/// Авторские процедуры по категориям
pub type AuthoredProcedures = BTreeMap<AuthoredCategory, Vec<AuthoredRecord>>;

/// Подстрока, по которой тип процедуры считается «русской» (дороже)
pub const RUSSIAN_MARKER: &str = "Русская";
/// Подстроки, открывающие новую группу в листе коллективных процедур
pub const GROUP_MARKERS: [&str; 2] = [RUSSIAN_MARKER, "Хаммам"];

/// Тип коллективной процедуры (ключ группировки)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProcedureGroup {
    /// Строки без типа: до первого заголовка или без категории в ростере
    Uncategorized,
    Category(String),
}

impl ProcedureGroup {
    pub fn label(&self) -> Option<&str> {
        match self {
            ProcedureGroup::Uncategorized => None,
            ProcedureGroup::Category(label) => Some(label.as_str()),
        }
    }

    /// Цена одной коллективной процедуры; для групп без типа — `None`
    pub fn unit_price(&self) -> Option<Decimal> {
        self.label().map(collective_unit_price)
    }
}

impl From<Option<String>> for ProcedureGroup {
    fn from(label: Option<String>) -> Self {
        match label {
            Some(label) => ProcedureGroup::Category(label),
            None => ProcedureGroup::Uncategorized,
        }
    }
}

/// Цена коллективной процедуры по названию типа
pub fn collective_unit_price(label: &str) -> Decimal {
    if label.contains(RUSSIAN_MARKER) {
        dec!(600)
    } else {
        dec!(400)
    }
}

/// Участие в коллективной процедуре
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectiveEntry {
    pub staff_name: String,
    pub quantity: u32,
}

impl CollectiveEntry {
    pub fn new(staff_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            staff_name: staff_name.into(),
            quantity,
        }
    }
}

/// Коллективные процедуры по типам, в порядке появления
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectiveProcedures {
    groups: Vec<(ProcedureGroup, Vec<CollectiveEntry>)>,
}

impl CollectiveProcedures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Заменить записи группы целиком
    pub fn insert(&mut self, group: ProcedureGroup, entries: Vec<CollectiveEntry>) {
        match self.groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, existing)) => *existing = entries,
            None => self.groups.push((group, entries)),
        }
    }

    /// Добавить запись в группу (группа создаётся при необходимости)
    pub fn push(&mut self, group: ProcedureGroup, entry: CollectiveEntry) {
        match self.groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, existing)) => existing.push(entry),
            None => self.groups.push((group, vec![entry])),
        }
    }

    pub fn get(&self, group: &ProcedureGroup) -> Option<&[CollectiveEntry]> {
        self.groups
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProcedureGroup, &[CollectiveEntry])> {
        self.groups.iter().map(|(g, entries)| (g, entries.as_slice()))
    }

    /// Только группы с типом: участвуют в деньгах и отчёте
    pub fn categorized(&self) -> impl Iterator<Item = (&str, &[CollectiveEntry])> {
        self.iter()
            .filter_map(|(g, entries)| g.label().map(|label| (label, entries)))
    }

    pub fn retain_non_empty(&mut self) {
        self.groups.retain(|(_, entries)| !entries.is_empty());
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Количество смен по табелю: ключ — имя как в табеле
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftTally {
    counts: Vec<(String, u32)>,
}

impl ShiftTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        match self.counts.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) => *count = count.saturating_add(1),
            None => self.counts.push((key.to_string(), 1)),
        }
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.counts.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }

    /// Ключи в порядке первого появления
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, c)| (k.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, u32)> for ShiftTally {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        let mut tally = ShiftTally::new();
        for (key, count) in iter {
            match tally.counts.iter_mut().find(|(k, _)| k == key) {
                Some((_, c)) => *c += count,
                None => tally.counts.push((key.to_string(), count)),
            }
        }
        tally
    }
}

/// Сотрудник с назначенной ставкой
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub staff_name: String,
    pub rank: Rank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_table() {
        let table: Vec<(Decimal, Decimal)> = Rank::ALL
            .iter()
            .map(|r| (r.base_salary(), r.procedure_percentage()))
            .collect();
        assert_eq!(
            table,
            vec![
                (dec!(1000), dec!(0)),
                (dec!(1200), dec!(0.25)),
                (dec!(1500), dec!(0.30)),
                (dec!(2000), dec!(0.35)),
            ]
        );
    }

    #[test]
    fn test_rank_parse() {
        assert_eq!("мастер".parse::<Rank>().unwrap(), Rank::Senior);
        assert_eq!(" Старший мастер ".parse::<Rank>().unwrap(), Rank::Head);
        assert_eq!("стажёр".parse::<Rank>().unwrap(), Rank::Intern);
        assert_eq!("junior".parse::<Rank>().unwrap(), Rank::Junior);
        assert!(matches!("админ".parse::<Rank>(), Err(Error::UnknownRank(_))));
    }

    #[test]
    fn test_rank_serde_uses_labels() {
        let json = serde_json::to_string(&Rank::Junior).unwrap();
        assert_eq!(json, "\"младший мастер\"");
        let rank: Rank = serde_json::from_str("\"старший мастер\"").unwrap();
        assert_eq!(rank, Rank::Head);
        assert!(serde_json::from_str::<Rank>("\"повар\"").is_err());
    }

    #[test]
    fn test_authored_category_from_label() {
        assert_eq!(
            AuthoredCategory::from_label("Парение авторское "),
            Some(AuthoredCategory::Individual)
        );
        assert_eq!(
            AuthoredCategory::from_label("Коллективное парение для компании"),
            Some(AuthoredCategory::CompanyCollective)
        );
        assert_eq!(AuthoredCategory::from_label("Массаж"), None);
    }

    #[test]
    fn test_collective_unit_price() {
        assert_eq!(collective_unit_price("Русская баня"), dec!(600));
        assert_eq!(collective_unit_price("Хаммам"), dec!(400));
        assert_eq!(collective_unit_price("Финская сауна"), dec!(400));
        assert_eq!(ProcedureGroup::Uncategorized.unit_price(), None);
    }

    #[test]
    fn test_collective_procedures_keeps_order_and_replaces() {
        let mut procedures = CollectiveProcedures::new();
        let banya = ProcedureGroup::Category("Русская баня".into());
        let hammam = ProcedureGroup::Category("Хаммам".into());

        procedures.insert(banya.clone(), vec![CollectiveEntry::new("Петров", 1)]);
        procedures.push(hammam.clone(), CollectiveEntry::new("Иванов", 2));
        procedures.push(banya.clone(), CollectiveEntry::new("Сидоров", 3));

        let order: Vec<_> = procedures.iter().map(|(g, _)| g.clone()).collect();
        assert_eq!(order, vec![banya.clone(), hammam.clone()]);
        assert_eq!(procedures.get(&banya).unwrap().len(), 2);

        procedures.insert(banya.clone(), vec![]);
        procedures.retain_non_empty();
        assert_eq!(procedures.len(), 1);
        assert!(procedures.get(&banya).is_none());
    }

    #[test]
    fn test_categorized_skips_uncategorized() {
        let mut procedures = CollectiveProcedures::new();
        procedures.push(ProcedureGroup::Uncategorized, CollectiveEntry::new("Петров", 4));
        procedures.push(
            ProcedureGroup::Category("Хаммам".into()),
            CollectiveEntry::new("Петров", 1),
        );
        let labels: Vec<&str> = procedures.categorized().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Хаммам"]);
    }

    #[test]
    fn test_shift_tally_counts_in_order() {
        let mut tally = ShiftTally::new();
        tally.add("Иван Петров");
        tally.add("Анна");
        tally.add("Иван Петров");
        let entries: Vec<(&str, u32)> = tally.iter().collect();
        assert_eq!(entries, vec![("Иван Петров", 2), ("Анна", 1)]);
        assert_eq!(tally.get("Анна"), Some(1));
        assert_eq!(tally.get("Никто"), None);
    }
}
