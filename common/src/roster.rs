//! Ростер: кто работал и с какой ставкой
//!
//! Ставка запрашивается через `RankSource`, поэтому разбор не знает,
//! спрашивают ли оператора в консоли или берут ставку из настроек.

use crate::error::Result;
use crate::schema::CollectiveRow;
use crate::types::{CollectiveEntry, CollectiveProcedures, ProcedureGroup, Rank, RosterEntry, ShiftTally};
use std::collections::HashMap;

/// Служебная строка выгрузки, не сотрудник
pub const SOLD_WITH_DISH: &str = "Продано с блюдом";

/// Источник ставок сотрудников
pub trait RankSource {
    fn rank_for(&mut self, staff_name: &str) -> Result<Rank>;
}

/// Одна ставка для всех (режим без вопросов)
#[derive(Debug, Clone, Copy)]
pub struct FixedRank(pub Rank);

impl RankSource for FixedRank {
    fn rank_for(&mut self, _staff_name: &str) -> Result<Rank> {
        Ok(self.0)
    }
}

/// Заранее заданные ставки, для остальных — запасной источник
pub struct PresetRanks<S> {
    ranks: HashMap<String, Rank>,
    fallback: S,
}

impl<S: RankSource> PresetRanks<S> {
    pub fn new(ranks: HashMap<String, Rank>, fallback: S) -> Self {
        Self { ranks, fallback }
    }

    /// JSON вида `{"Иванов Иван": "мастер"}`
    pub fn from_json(json: &str, fallback: S) -> Result<Self> {
        let ranks: HashMap<String, Rank> = serde_json::from_str(json)?;
        Ok(Self::new(ranks, fallback))
    }

    /// Задать или заменить ставку сотрудника
    pub fn insert(&mut self, staff_name: impl Into<String>, rank: Rank) {
        self.ranks.insert(staff_name.into(), rank);
    }
}

impl<S: RankSource> RankSource for PresetRanks<S> {
    fn rank_for(&mut self, staff_name: &str) -> Result<Rank> {
        match self.ranks.get(staff_name.trim()) {
            Some(rank) => Ok(*rank),
            None => self.fallback.rank_for(staff_name),
        }
    }
}

impl<F> RankSource for F
where
    F: FnMut(&str) -> Result<Rank>,
{
    fn rank_for(&mut self, staff_name: &str) -> Result<Rank> {
        self(staff_name)
    }
}

/// Разные имена сотрудников в порядке первого появления, без служебной строки
pub fn distinct_staff_names(roster: &[&CollectiveRow]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in roster.iter().filter_map(|row| row.name.as_deref()) {
        if name != SOLD_WITH_DISH && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Назначить ставки и добавить строки ростера в коллективные процедуры.
///
/// Строки ростера ложатся в группу по собственной ячейке категории,
/// без категории — в `ProcedureGroup::Uncategorized`.
pub fn resolve_roster(
    roster: &[&CollectiveRow],
    collective: &mut CollectiveProcedures,
    ranks: &mut dyn RankSource,
) -> Result<Vec<RosterEntry>> {
    let mut entries = Vec::new();

    for name in distinct_staff_names(roster) {
        let rank = ranks.rank_for(&name)?;
        tracing::debug!("{}: ставка {}", name, rank);

        for row in roster.iter().filter(|row| row.name.as_deref() == Some(name.as_str())) {
            collective.push(
                ProcedureGroup::from(row.category.clone()),
                CollectiveEntry::new(name.clone(), row.quantity.quantity_or_zero()),
            );
        }

        entries.push(RosterEntry {
            staff_name: name,
            rank,
        });
    }

    Ok(entries)
}

fn name_tokens(name: &str) -> Vec<String> {
    name.split_whitespace().map(str::to_lowercase).collect()
}

/// Совпадает ли ключ табеля с полным именем: хватает одного общего слова
pub fn names_match(tally_key: &str, staff_name: &str) -> bool {
    let staff_tokens = name_tokens(staff_name);
    name_tokens(tally_key)
        .iter()
        .any(|token| staff_tokens.contains(token))
}

/// Смены сотрудника по табелю: первый подходящий ключ
pub fn matched_shift_count<'t>(tally: &'t ShiftTally, staff_name: &str) -> Option<(&'t str, u32)> {
    tally.iter().find(|(key, _)| names_match(key, staff_name))
}
