//! Расчёт зарплаты пармастеров: обвязка вокруг `payroll_common`

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod payroll;
pub mod rank_prompt;
pub mod scanner;
pub mod sheet;
