//! Ядро расчёта зарплаты пармастеров
//!
//! Без файлов и консоли: на входе таблицы ячеек, на выходе отчёт.

pub mod error;
pub mod grid;
pub mod schema;
pub mod types;
pub mod extractor;
pub mod roster;
pub mod compensation;
pub mod cauldron;
pub mod report;
pub mod export;

pub use error::{Error, Result};
pub use grid::{Cell, Grid};
pub use types::{
    AuthoredCategory, AuthoredProcedures, AuthoredRecord, CollectiveEntry, CollectiveProcedures,
    ProcedureGroup, Rank, RosterEntry, ShiftTally,
};
pub use roster::{FixedRank, PresetRanks, RankSource};
pub use compensation::{DetailRow, Parmaster};
pub use report::{build_report, PayrollReport, ReportRow};
