//! Выгрузка отчёта

#[cfg(feature = "excel")]
pub mod excel_core;
