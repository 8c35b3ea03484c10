//! Схемы листов: номер столбца → именованное поле
//!
//! Выгрузки адресуются только по позиции столбца. Вся эта хрупкость
//! собрана здесь: каждый лист один раз превращается в список записей,
//! дальше код работает только с полями.

use crate::grid::{Cell, Grid};

/// Строка листа авторских процедур
#[derive(Debug, Clone, PartialEq)]
pub struct AuthoredRow {
    pub category: Option<String>,
    pub name: Option<String>,
    pub quantity: Cell,
    pub price: Cell,
}

/// Строка листа коллективных процедур (он же ростер)
#[derive(Debug, Clone, PartialEq)]
pub struct CollectiveRow {
    pub category: Option<String>,
    pub name: Option<String>,
    pub quantity: Cell,
}

/// Строка табеля смен
#[derive(Debug, Clone, PartialEq)]
pub struct StaffingRow {
    pub role: Option<String>,
    pub name_key: Option<String>,
    /// Отметки о сменах (по одной ячейке на день)
    pub shift_marks: Vec<Cell>,
}

/// Строка сводного листа
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: Option<String>,
    pub total: Cell,
}

/// Столбцы листа авторских процедур
#[derive(Debug, Clone, Copy)]
pub struct AuthoredColumns {
    pub category: usize,
    pub name: usize,
    pub quantity: usize,
    pub price: usize,
}

impl Default for AuthoredColumns {
    fn default() -> Self {
        Self {
            category: 0,
            name: 1,
            quantity: 2,
            price: 3,
        }
    }
}

impl AuthoredColumns {
    pub fn map(&self, grid: &Grid) -> Vec<AuthoredRow> {
        (0..grid.height())
            .map(|r| AuthoredRow {
                category: grid.get(r, self.category).text(),
                name: grid.get(r, self.name).text(),
                quantity: grid.get(r, self.quantity).clone(),
                price: grid.get(r, self.price).clone(),
            })
            .collect()
    }
}

/// Столбцы листа коллективных процедур
#[derive(Debug, Clone, Copy)]
pub struct CollectiveColumns {
    pub category: usize,
    pub name: usize,
    pub quantity: usize,
}

impl Default for CollectiveColumns {
    fn default() -> Self {
        Self {
            category: 2,
            name: 3,
            quantity: 4,
        }
    }
}

impl CollectiveColumns {
    pub fn map(&self, grid: &Grid) -> Vec<CollectiveRow> {
        (0..grid.height())
            .map(|r| CollectiveRow {
                category: grid.get(r, self.category).text(),
                name: grid.get(r, self.name).text(),
                quantity: grid.get(r, self.quantity).clone(),
            })
            .collect()
    }
}

/// Столбцы табеля: отметки смен идут с `first_shift` до предпоследнего столбца
#[derive(Debug, Clone, Copy)]
pub struct StaffingColumns {
    pub role: usize,
    pub name_key: usize,
    pub first_shift: usize,
}

impl Default for StaffingColumns {
    fn default() -> Self {
        Self {
            role: 0,
            name_key: 2,
            first_shift: 3,
        }
    }
}

impl StaffingColumns {
    pub fn map(&self, grid: &Grid) -> Vec<StaffingRow> {
        // последний столбец — итог по строке, в счёт не идёт
        let last_shift = grid.width().saturating_sub(1);
        (0..grid.height())
            .map(|r| StaffingRow {
                role: grid.get(r, self.role).text(),
                name_key: grid.get(r, self.name_key).text(),
                shift_marks: (self.first_shift..last_shift)
                    .map(|c| grid.get(r, c).clone())
                    .collect(),
            })
            .collect()
    }
}

/// Столбцы сводного листа
#[derive(Debug, Clone, Copy)]
pub struct SummaryColumns {
    pub label: usize,
    pub total: usize,
}

impl Default for SummaryColumns {
    fn default() -> Self {
        Self { label: 0, total: 4 }
    }
}

impl SummaryColumns {
    pub fn map(&self, grid: &Grid) -> Vec<SummaryRow> {
        (0..grid.height())
            .map(|r| SummaryRow {
                label: grid.get(r, self.label).text(),
                total: grid.get(r, self.total).clone(),
            })
            .collect()
    }
}
