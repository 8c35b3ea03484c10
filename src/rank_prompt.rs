//! Выбор ставки сотрудника в консоли

use dialoguer::Select;
use payroll_common::{Error, Rank, RankSource};

/// Спрашивает ставку у оператора для каждого нового сотрудника
#[derive(Debug)]
pub struct PromptRank {
    default: Rank,
}

impl PromptRank {
    /// Курсор меню сразу стоит на этой ставке
    pub fn with_default(rank: Rank) -> Self {
        Self {
            default: rank,
        }
    }
}

/// Позиция ставки в меню
pub fn rank_index(rank: Rank) -> usize {
    Rank::ALL.iter().position(|r| *r == rank).unwrap_or(0)
}

pub fn rank_labels() -> Vec<&'static str> {
    Rank::ALL.iter().map(Rank::label).collect()
}

impl RankSource for PromptRank {
    fn rank_for(&mut self, staff_name: &str) -> payroll_common::Result<Rank> {
        let selection = Select::new()
            .with_prompt(format!("Ставка для {}", staff_name))
            .items(&rank_labels())
            .default(rank_index(self.default))
            .interact()
            .map_err(|e| Error::RankSelection(e.to_string()))?;

        let rank = Rank::ALL
            .get(selection)
            .copied()
            .ok_or_else(|| Error::RankSelection(format!("нет пункта {}", selection)))?;
        println!("→ {}: {}", staff_name, rank);
        Ok(rank)
    }
}
