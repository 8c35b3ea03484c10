//! Прямоугольная таблица ячеек
//!
//! Ячейки приходят из xlsx как есть: пустые, строки, целые, дробные.
//! Координаты абсолютные (строка 0 — первая строка листа), отсутствующие
//! ячейки читаются как `Cell::Empty`.

use rust_decimal::prelude::*;

/// Значение одной ячейки
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

static EMPTY: Cell = Cell::Empty;

impl Cell {
    /// Пустая ячейка (пустая строка тоже считается пустой)
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Непустое содержимое ячейки как строка (обрезанная)
    pub fn text(&self) -> Option<String> {
        let value = match self {
            Cell::Empty => return None,
            Cell::Text(s) => s.trim().to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) if f.is_nan() => return None,
            Cell::Float(f) => f.to_string(),
            Cell::Bool(b) => b.to_string(),
        };
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Строгое количество: неотрицательное целое число или строка из цифр.
    ///
    /// Всё остальное (дроби, отрицательные, текст) — `None`.
    pub fn whole_quantity(&self) -> Option<u32> {
        match self {
            Cell::Int(i) => u32::try_from(*i).ok(),
            Cell::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => {
                u32::try_from(*f as u64).ok()
            }
            Cell::Text(s) => {
                let s = s.trim();
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                    s.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Нестрогое количество: дробь отбрасывается, мусор превращается в 0
    pub fn quantity_or_zero(&self) -> u32 {
        match self {
            Cell::Int(i) => u32::try_from(*i).unwrap_or(0),
            Cell::Float(f) if f.is_finite() && *f >= 0.0 => {
                u32::try_from(f.trunc() as u64).unwrap_or(0)
            }
            Cell::Text(s) => {
                let s = s.trim();
                s.parse::<u32>()
                    .ok()
                    .or_else(|| {
                        s.parse::<f64>()
                            .ok()
                            .filter(|f| f.is_finite() && *f >= 0.0)
                            .and_then(|f| u32::try_from(f.trunc() as u64).ok())
                    })
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Денежное значение ячейки
    pub fn decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Int(i) => Some(Decimal::from(*i)),
            Cell::Float(f) => Decimal::from_f64(*f),
            Cell::Text(s) => {
                let s = s.trim().replace(' ', "").replace(',', ".");
                Decimal::from_str(&s).ok()
            }
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// Лист целиком
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Количество строк
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Количество столбцов (по самой длинной строке)
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Строки данных ниже строки заголовка `header_row` (как `header=3` в выгрузках)
    pub fn skip_header(&self, header_row: usize) -> Grid {
        let rows: Vec<Vec<Cell>> = self.rows.iter().skip(header_row + 1).cloned().collect();
        Grid {
            rows,
            width: self.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_quantity_accepts_digits_only() {
        assert_eq!(Cell::Int(3).whole_quantity(), Some(3));
        assert_eq!(Cell::Float(2.0).whole_quantity(), Some(2));
        assert_eq!(Cell::from("12").whole_quantity(), Some(12));
        assert_eq!(Cell::from(" 7 ").whole_quantity(), Some(7));

        assert_eq!(Cell::Int(-1).whole_quantity(), None);
        assert_eq!(Cell::Float(2.5).whole_quantity(), None);
        assert_eq!(Cell::from("-1").whole_quantity(), None);
        assert_eq!(Cell::from("два").whole_quantity(), None);
        assert_eq!(Cell::Empty.whole_quantity(), None);
    }

    #[test]
    fn test_quantity_or_zero_defaults() {
        assert_eq!(Cell::Int(4).quantity_or_zero(), 4);
        assert_eq!(Cell::Float(3.9).quantity_or_zero(), 3);
        assert_eq!(Cell::from("5").quantity_or_zero(), 5);
        assert_eq!(Cell::from("2.0").quantity_or_zero(), 2);
        assert_eq!(Cell::from("много").quantity_or_zero(), 0);
        assert_eq!(Cell::Int(-2).quantity_or_zero(), 0);
        assert_eq!(Cell::Empty.quantity_or_zero(), 0);
    }

    #[test]
    fn test_text_trims_and_skips_empty() {
        assert_eq!(Cell::from("  Русская баня ").text(), Some("Русская баня".to_string()));
        assert_eq!(Cell::from("   ").text(), None);
        assert_eq!(Cell::Empty.text(), None);
        assert_eq!(Cell::Int(10).text(), Some("10".to_string()));
    }

    #[test]
    fn test_decimal_parsing() {
        assert_eq!(Cell::Int(1000).decimal(), Some(dec!(1000)));
        assert_eq!(Cell::from("1 500,50").decimal(), Some(dec!(1500.50)));
        assert_eq!(Cell::from("нет").decimal(), None);
        assert_eq!(Cell::Empty.decimal(), None);
    }

    #[test]
    fn test_grid_out_of_range_is_empty() {
        let grid = Grid::new(vec![vec![Cell::from("a")], vec![Cell::Empty, Cell::Int(1), Cell::Int(2)]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(0, 2), &Cell::Empty);
        assert_eq!(grid.get(5, 0), &Cell::Empty);
        assert_eq!(grid.get(1, 2), &Cell::Int(2));
    }

    #[test]
    fn test_skip_header() {
        let grid = Grid::new(vec![
            vec![Cell::from("title")],
            vec![Cell::Empty],
            vec![Cell::Empty],
            vec![Cell::from("header")],
            vec![Cell::from("data")],
        ]);
        let data = grid.skip_header(3);
        assert_eq!(data.height(), 1);
        assert_eq!(data.get(0, 0), &Cell::from("data"));
    }
}
