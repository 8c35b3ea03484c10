//! Расчёт от листов до готового отчёта

use crate::error::{PayrollError, Result};
use crate::scanner::InputFiles;
use crate::sheet::{read_grid, read_grid_with_header};
use payroll_common::compensation::build_parmasters;
use payroll_common::extractor::{
    extract_authored, extract_collective, extract_reported_total, extract_shift_tally, roster_rows,
};
use payroll_common::roster::resolve_roster;
use payroll_common::schema::{AuthoredColumns, CollectiveColumns, StaffingColumns, SummaryColumns};
use payroll_common::{build_report, Grid, PayrollReport, RankSource};
use std::path::{Path, PathBuf};

/// Режим запуска
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Спрашивать ставки и переносить выгрузки в папку с датой
    pub interactive: bool,
    /// Явная папка для отчёта
    pub output_dir: Option<PathBuf>,
}

impl RunOptions {
    /// Куда писать отчёт: явная папка, папка с датой (интерактивно) или папка выгрузок
    pub fn report_dir(&self, input_dir: &Path, token: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None if self.interactive => input_dir.join(token),
            None => input_dir.to_path_buf(),
        }
    }
}

/// Четыре прочитанных листа
#[derive(Debug, Clone)]
pub struct Sheets {
    /// Имя файла сводки (для сообщений)
    pub summary_source: String,
    pub summary: Grid,
    pub authored: Grid,
    pub collective: Grid,
    pub staffing: Grid,
}

/// Прочитать выгрузки; у табеля нет заголовка
pub fn load_sheets(inputs: &InputFiles, header_row: usize) -> Result<Sheets> {
    Ok(Sheets {
        summary_source: inputs.summary.display().to_string(),
        summary: read_grid_with_header(&inputs.summary, header_row)?,
        authored: read_grid_with_header(&inputs.authored, header_row)?,
        collective: read_grid_with_header(&inputs.collective, header_row)?,
        staffing: read_grid(&inputs.staffing)?,
    })
}

/// Посчитать отчёт по прочитанным листам
pub fn calculate(sheets: &Sheets, ranks: &mut dyn RankSource) -> Result<PayrollReport> {
    let summary_rows = SummaryColumns::default().map(&sheets.summary);
    let reported_total = extract_reported_total(&summary_rows)
        .ok_or_else(|| PayrollError::MissingTotal(sheets.summary_source.clone()))?;

    let authored = extract_authored(&AuthoredColumns::default().map(&sheets.authored));

    let collective_rows = CollectiveColumns::default().map(&sheets.collective);
    let mut collective = extract_collective(&collective_rows);
    let roster = roster_rows(&collective_rows);

    let tally = extract_shift_tally(&StaffingColumns::default().map(&sheets.staffing));
    tracing::debug!("котёл {}, смен в табеле: {} ключей", reported_total, tally.len());

    let entries = resolve_roster(&roster, &mut collective, ranks)?;
    let parmasters = build_parmasters(entries, &authored, &collective, &tally);

    Ok(build_report(&parmasters, reported_total))
}

pub fn run_payroll(
    inputs: &InputFiles,
    header_row: usize,
    ranks: &mut dyn RankSource,
) -> Result<PayrollReport> {
    let sheets = load_sheets(inputs, header_row)?;
    calculate(&sheets, ranks)
}
