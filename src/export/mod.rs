pub mod archive;
pub mod excel;

use chrono::NaiveDateTime;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Метка, когда в имени выгрузки нет даты
pub const NO_DATE_TOKEN: &str = "no_date_found";

const TOKEN_FORMAT: &str = "%d_%m_%Y_%H_%M_%S";

lazy_static::lazy_static! {
    static ref DATE_TIME_RE: Regex = Regex::new(r"\d{2}_\d{2}_\d{4}_\d{2}_\d{2}_\d{2}").unwrap();
}

/// Дата-время выгрузки из имени файла: `ДД_ММ_ГГГГ_ЧЧ_ММ_СС`
pub fn date_time_token(file_name: &str) -> Option<String> {
    let token = DATE_TIME_RE.find(file_name)?.as_str().to_string();
    if NaiveDateTime::parse_from_str(&token, TOKEN_FORMAT).is_err() {
        tracing::warn!("метка {} не похожа на дату, используется как есть", token);
    }
    Some(token)
}

/// Метка отчёта по имени файла коллективных процедур
pub fn report_token(collective: &Path) -> String {
    collective
        .file_name()
        .and_then(|name| date_time_token(&name.to_string_lossy()))
        .unwrap_or_else(|| NO_DATE_TOKEN.to_string())
}

/// `{prefix}_{token}.xlsx`
pub fn report_file_name(prefix: &str, token: &str) -> String {
    format!("{}_{}.xlsx", prefix, token)
}

pub fn report_path(dir: &Path, prefix: &str, token: &str) -> PathBuf {
    dir.join(report_file_name(prefix, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_time_token() {
        assert_eq!(
            date_time_token("!4_коллективные_01_02_2024_10_30_00.xlsx"),
            Some("01_02_2024_10_30_00".to_string())
        );
        assert_eq!(date_time_token("!4_коллективные.xlsx"), None);
    }

    #[test]
    fn test_invalid_date_still_used() {
        assert_eq!(
            date_time_token("!4_99_99_2024_99_99_99.xlsx"),
            Some("99_99_2024_99_99_99".to_string())
        );
    }

    #[test]
    fn test_report_token_fallback() {
        assert_eq!(report_token(Path::new("/tmp/!4_без_даты.xlsx")), NO_DATE_TOKEN);
        assert_eq!(
            report_token(Path::new("/tmp/!4_15_03_2024_23_59_59.xlsx")),
            "15_03_2024_23_59_59"
        );
    }

    #[test]
    fn test_report_path() {
        let path = report_path(Path::new("out"), "Финальный_отчет", "no_date_found");
        assert_eq!(path, Path::new("out").join("Финальный_отчет_no_date_found.xlsx"));
    }
}
