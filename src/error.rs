use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("Ошибка настроек: {0}")]
    Config(String),

    #[error("Не найден один из файлов: {}", .0.join(", "))]
    MissingInputs(Vec<String>),

    #[error("Папка не найдена: {0}")]
    FolderNotFound(String),

    #[error("Ошибка чтения книги {path}: {message}")]
    Workbook { path: String, message: String },

    #[error("В книге нет листов: {0}")]
    EmptyWorkbook(String),

    #[error("В сводке {0} нет строки «Итого»")]
    MissingTotal(String),

    #[error("Ошибка создания Excel: {0}")]
    ExcelGeneration(String),

    #[error("Неверный формат ставки «{0}», нужно ИМЯ=СТАВКА")]
    InvalidRankArg(String),

    #[error("Ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] payroll_common::Error),
}

pub type Result<T> = std::result::Result<T, PayrollError>;
