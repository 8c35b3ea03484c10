//! Запись отчёта в xlsx

use crate::error::{PayrollError, Result};
use payroll_common::export::excel_core;
use payroll_common::PayrollReport;
use std::path::Path;

pub fn write_report(report: &PayrollReport, output_path: &Path) -> Result<()> {
    let buffer = excel_core::generate_report_buffer(report).map_err(PayrollError::ExcelGeneration)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;

    tracing::debug!("{}: {} строк, {} процедур", output_path.display(), report.rows.len(), report.details.len());
    Ok(())
}
