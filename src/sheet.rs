//! Чтение xlsx в таблицу ячеек (calamine)

use crate::error::{PayrollError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use payroll_common::{Cell, Grid};
use std::path::Path;

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

/// Диапазон calamine → таблица в абсолютных координатах листа
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let (start_row, start_col) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Grid::default(),
    };

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(to_cell));
        rows.push(cells);
    }
    Grid::new(rows)
}

/// Первый лист книги
pub fn read_grid(path: &Path) -> Result<Grid> {
    let workbook_error = |message: String| PayrollError::Workbook {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PayrollError::EmptyWorkbook(path.display().to_string()))?
        .map_err(|e| workbook_error(e.to_string()))?;

    tracing::debug!("{}: {:?} ячеек", path.display(), range.get_size());
    Ok(range_to_grid(&range))
}

/// Первый лист книги без строк до заголовка включительно
pub fn read_grid_with_header(path: &Path, header_row: usize) -> Result<Grid> {
    Ok(read_grid(path)?.skip_header(header_row))
}
