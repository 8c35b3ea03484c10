//! Генерация xlsx отчёта (общая часть)
//!
//! Два листа: «Отчет» (строка на сотрудника) и «Все процедуры».
//! Деньги округляются до копеек при записи.

use crate::compensation::DetailRow;
use crate::report::{PayrollReport, ReportRow, DETAIL_HEADERS, DETAIL_SHEET, REPORT_HEADERS, REPORT_SHEET};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::*;

fn money(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or_default()
}

/// Значение ячейки отчёта
enum Value<'a> {
    Text(&'a str),
    Count(u32),
    Money(Decimal),
}

fn report_values(row: &ReportRow) -> [Value<'_>; 13] {
    [
        Value::Text(&row.name),
        Value::Text(&row.rank),
        Value::Money(row.base_salary),
        Value::Money(row.stake),
        Value::Money(row.collective_sum),
        Value::Count(row.collective_count),
        Value::Count(row.individual_count),
        Value::Money(row.individual_sum),
        Value::Count(row.company_count),
        Value::Money(row.company_sum),
        Value::Money(row.cauldron),
        Value::Money(row.total),
        Value::Count(row.session_count),
    ]
}

fn detail_values(row: &DetailRow) -> [Value<'_>; 4] {
    [
        Value::Text(&row.name),
        Value::Text(&row.procedure_type),
        Value::Count(row.quantity),
        Value::Money(row.value),
    ]
}

fn write_sheet<'r, const N: usize>(
    worksheet: &mut Worksheet,
    headers: &[&str; N],
    rows: impl Iterator<Item = [Value<'r>; N]>,
) -> Result<(), String> {
    let header_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin);
    let money_format = Format::new().set_num_format("#,##0.00");

    for (col, header) in headers.iter().enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| format!("Ошибка записи заголовка: {}", e))?;
        worksheet
            .set_column_width(col, if col == 0 { 28.0 } else { 16.0 })
            .map_err(|e| format!("Ошибка ширины столбца: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("Ошибка закрепления строки: {}", e))?;

    for (index, values) in rows.enumerate() {
        let row = index as u32 + 1;
        for (col, value) in values.iter().enumerate() {
            let col = col as u16;
            let written = match value {
                Value::Text(text) => worksheet.write_string(row, col, *text),
                Value::Count(count) => worksheet.write_number(row, col, f64::from(*count)),
                Value::Money(amount) => {
                    worksheet.write_number_with_format(row, col, money(*amount), &money_format)
                }
            };
            written.map_err(|e| format!("Ошибка записи ячейки ({}, {}): {}", row, col, e))?;
        }
    }

    Ok(())
}

/// Собрать книгу отчёта в буфер
pub fn generate_report_buffer(report: &PayrollReport) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary
        .set_name(REPORT_SHEET)
        .map_err(|e| format!("Ошибка имени листа: {}", e))?;
    write_sheet(summary, &REPORT_HEADERS, report.rows.iter().map(report_values))?;

    let details = workbook.add_worksheet();
    details
        .set_name(DETAIL_SHEET)
        .map_err(|e| format!("Ошибка имени листа: {}", e))?;
    write_sheet(details, &DETAIL_HEADERS, report.details.iter().map(detail_values))?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Ошибка сохранения Excel: {}", e))
}
