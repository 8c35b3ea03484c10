//! Типы ошибок ядра расчёта

use thiserror::Error;

/// Общий тип ошибки ядра
#[derive(Error, Debug)]
pub enum Error {
    #[error("Неизвестная ставка: {0}")]
    UnknownRank(String),

    #[error("Не удалось выбрать ставку: {0}")]
    RankSelection(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Псевдоним Result
pub type Result<T> = std::result::Result<T, Error>;
