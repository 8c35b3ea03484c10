use crate::config::InputPatterns;
use crate::error::{PayrollError, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Найденные выгрузки
#[derive(Debug, Clone, PartialEq)]
pub struct InputFiles {
    pub summary: PathBuf,
    pub authored: PathBuf,
    pub collective: PathBuf,
    pub staffing: PathBuf,
}

impl InputFiles {
    pub fn all(&self) -> [&Path; 4] {
        [&self.summary, &self.authored, &self.collective, &self.staffing]
    }
}

/// Имена файлов в папке (без подпапок), по алфавиту
fn file_names(folder: &Path) -> Result<Vec<String>> {
    if !folder.is_dir() {
        return Err(PayrollError::FolderNotFound(folder.display().to_string()));
    }

    let mut names: Vec<String> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();

    names.sort();
    Ok(names)
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern)
        .map_err(|e| PayrollError::Config(format!("Неверный шаблон «{}»: {}", pattern, e)))
}

/// Первый по алфавиту файл, подходящий под шаблон
pub fn find_first(folder: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let pattern = compile(pattern)?;
    Ok(file_names(folder)?
        .into_iter()
        .find(|name| pattern.matches(name))
        .map(|name| folder.join(name)))
}

/// Найти все четыре выгрузки; если чего-то нет — ошибка со списком шаблонов
pub fn discover_inputs(folder: &Path, patterns: &InputPatterns) -> Result<InputFiles> {
    let mut missing = Vec::new();

    let mut find = |pattern: &str| -> Result<PathBuf> {
        match find_first(folder, pattern)? {
            Some(path) => Ok(path),
            None => {
                missing.push(pattern.to_string());
                Ok(PathBuf::new())
            }
        }
    };

    let files = InputFiles {
        summary: find(&patterns.summary)?,
        authored: find(&patterns.authored)?,
        collective: find(&patterns.collective)?,
        staffing: find(&patterns.staffing)?,
    };

    if missing.is_empty() {
        Ok(files)
    } else {
        Err(PayrollError::MissingInputs(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            File::create(dir.join(name)).unwrap();
        }
    }

    #[test]
    fn test_folder_not_found() {
        let result = discover_inputs(Path::new("/nonexistent/folder"), &InputPatterns::default());
        assert!(matches!(result, Err(PayrollError::FolderNotFound(_))));
    }

    #[test]
    fn test_discover_all_inputs() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "!1_сводка.xlsx",
                "!3_авторские.xlsx",
                "!4_коллективные_01_02_2024_10_00_00.xlsx",
                "tmp_табель.xlsx",
                "readme.txt",
            ],
        );

        let files = discover_inputs(dir.path(), &InputPatterns::default()).unwrap();
        assert_eq!(files.summary, dir.path().join("!1_сводка.xlsx"));
        assert_eq!(files.authored, dir.path().join("!3_авторские.xlsx"));
        assert_eq!(files.collective, dir.path().join("!4_коллективные_01_02_2024_10_00_00.xlsx"));
        assert_eq!(files.staffing, dir.path().join("tmp_табель.xlsx"));
        assert_eq!(files.all().len(), 4);
    }

    #[test]
    fn test_missing_inputs_listed() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["!1_сводка.xlsx", "!3_авторские.xlsx"]);

        match discover_inputs(dir.path(), &InputPatterns::default()) {
            Err(PayrollError::MissingInputs(missing)) => {
                assert_eq!(missing, vec!["!4*.xlsx", "tmp*.xlsx"]);
            }
            other => panic!("ожидалась ошибка MissingInputs: {:?}", other),
        }
    }

    #[test]
    fn test_first_match_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["tmp_b.xlsx", "tmp_a.xlsx", "tmp_c.csv"]);
        fs::create_dir(dir.path().join("tmp_dir.xlsx")).unwrap();

        let found = find_first(dir.path(), "tmp*.xlsx").unwrap();
        assert_eq!(found, Some(dir.path().join("tmp_a.xlsx")));
        assert_eq!(find_first(dir.path(), "!9*.xlsx").unwrap(), None);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let result = find_first(dir.path(), "[");
        assert!(matches!(result, Err(PayrollError::Config(_))));
    }
}
