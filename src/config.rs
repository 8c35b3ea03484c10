use crate::error::{PayrollError, Result};
use payroll_common::Rank;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Шаблоны имён входных файлов
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputPatterns {
    /// Сводка с итогом котла
    pub summary: String,
    /// Авторские процедуры
    pub authored: String,
    /// Коллективные процедуры и ростер
    pub collective: String,
    /// Табель смен
    pub staffing: String,
}

impl Default for InputPatterns {
    fn default() -> Self {
        Self {
            summary: "!1*.xlsx".into(),
            authored: "!3*.xlsx".into(),
            collective: "!4*.xlsx".into(),
            staffing: "tmp*.xlsx".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub patterns: InputPatterns,
    /// Строка заголовка в сводке, авторских и коллективных листах
    pub header_row: usize,
    /// Ставка для всех, когда оператора не спрашивают
    pub default_rank: Rank,
    pub report_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PayrollError::Config("Не найдена домашняя папка".into()))?;
        Ok(home.join(".config").join("parmaster-payroll").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            patterns: InputPatterns::default(),
            header_row: 3,
            default_rank: Rank::Senior,
            report_prefix: "Финальный_отчет".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.header_row, 3);
        assert_eq!(config.default_rank, Rank::Senior);
        assert_eq!(config.patterns.staffing, "tmp*.xlsx");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"default_rank": "младший мастер", "patterns": {"summary": "итог*.xlsx"}}"#)
            .unwrap();
        assert_eq!(config.default_rank, Rank::Junior);
        assert_eq!(config.patterns.summary, "итог*.xlsx");
        assert_eq!(config.patterns.authored, "!3*.xlsx");
        assert_eq!(config.report_prefix, "Финальный_отчет");
    }

    #[test]
    fn test_invalid_rank_in_config() {
        let result = Config::from_json(r#"{"default_rank": "директор"}"#);
        assert!(matches!(result, Err(PayrollError::Json(_))));
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"default_rank\":\"мастер\""));
        assert_eq!(Config::from_json(&json).unwrap(), config);
    }
}
