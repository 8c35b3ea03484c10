use crate::error::{PayrollError, Result};
use clap::Parser;
use payroll_common::{PresetRanks, Rank, RankSource};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parmaster-payroll")]
#[command(about = "Расчёт зарплаты пармастеров по выгрузкам смен и процедур", long_about = None)]
pub struct Cli {
    /// Папка с выгрузками
    #[arg(short, long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Куда положить отчёт (по умолчанию — папка с датой выгрузки)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Не спрашивать ставки и не переносить выгрузки в архив
    #[arg(long)]
    pub non_interactive: bool,

    /// Ставка сотрудника: "ИМЯ=СТАВКА" (можно несколько раз)
    #[arg(short, long = "rank")]
    pub ranks: Vec<String>,

    /// JSON со ставками: {"ИМЯ": "СТАВКА"}
    #[arg(long)]
    pub ranks_file: Option<PathBuf>,

    /// Записать настройки по умолчанию в ~/.config и выйти
    #[arg(long)]
    pub init_config: bool,

    /// Подробный лог
    #[arg(short, long)]
    pub verbose: bool,
}

/// Разобрать "ИМЯ=СТАВКА"
pub fn parse_rank_arg(arg: &str) -> Result<(String, Rank)> {
    let (name, rank) = arg
        .rsplit_once('=')
        .ok_or_else(|| PayrollError::InvalidRankArg(arg.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(PayrollError::InvalidRankArg(arg.to_string()));
    }
    Ok((name.to_string(), rank.parse()?))
}

impl Cli {
    /// Ставки из `--ranks-file` и `--rank` (командная строка важнее),
    /// для остальных — `fallback`
    pub fn rank_source<S: RankSource>(&self, fallback: S) -> Result<PresetRanks<S>> {
        let mut ranks = match &self.ranks_file {
            Some(path) => PresetRanks::from_json(&std::fs::read_to_string(path)?, fallback)?,
            None => PresetRanks::new(HashMap::new(), fallback),
        };
        for arg in &self.ranks {
            let (name, rank) = parse_rank_arg(arg)?;
            ranks.insert(name, rank);
        }
        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payroll_common::FixedRank;

    #[test]
    fn test_parse_rank_arg() {
        let (name, rank) = parse_rank_arg("Петров Иван=старший мастер").unwrap();
        assert_eq!(name, "Петров Иван");
        assert_eq!(rank, Rank::Head);
    }

    #[test]
    fn test_parse_rank_arg_errors() {
        assert!(matches!(parse_rank_arg("Петров"), Err(PayrollError::InvalidRankArg(_))));
        assert!(matches!(parse_rank_arg("=мастер"), Err(PayrollError::InvalidRankArg(_))));
        assert!(matches!(parse_rank_arg("Петров=повар"), Err(PayrollError::Common(_))));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["parmaster-payroll"]);
        assert_eq!(cli.input_dir, PathBuf::from("."));
        assert!(!cli.non_interactive);

        let mut ranks = cli.rank_source(FixedRank(Rank::Junior)).unwrap();
        assert_eq!(ranks.rank_for("Кто угодно").unwrap(), Rank::Junior);
    }

    #[test]
    fn test_cli_ranks() {
        let cli = Cli::parse_from([
            "parmaster-payroll",
            "--non-interactive",
            "--rank",
            "Петров=стажер",
            "-r",
            "Иванов=junior",
        ]);
        let mut ranks = cli.rank_source(FixedRank(Rank::Head)).unwrap();
        assert_eq!(ranks.rank_for("Петров").unwrap(), Rank::Intern);
        assert_eq!(ranks.rank_for("Иванов").unwrap(), Rank::Junior);
        assert_eq!(ranks.rank_for("Сидоров").unwrap(), Rank::Head);
    }

    #[test]
    fn test_ranks_file_overridden_by_args() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranks.json");
        std::fs::write(&path, r#"{"Петров": "мастер", "Сидоров": "стажер"}"#).unwrap();

        let args: Vec<std::ffi::OsString> = vec![
            "parmaster-payroll".into(),
            "--ranks-file".into(),
            path.clone().into_os_string(),
            "--rank".into(),
            "Петров=старший мастер".into(),
        ];
        let cli = Cli::parse_from(args);
        let mut ranks = cli.rank_source(FixedRank(Rank::Senior)).unwrap();
        assert_eq!(ranks.rank_for("Петров").unwrap(), Rank::Head);
        assert_eq!(ranks.rank_for("Сидоров").unwrap(), Rank::Intern);
        assert_eq!(ranks.rank_for("Иванов").unwrap(), Rank::Senior);
    }

    #[test]
    fn test_ranks_file_with_unknown_rank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranks.json");
        std::fs::write(&path, r#"{"Петров": "директор"}"#).unwrap();

        let args: Vec<std::ffi::OsString> = vec![
            "parmaster-payroll".into(),
            "--ranks-file".into(),
            path.into_os_string(),
        ];
        let cli = Cli::parse_from(args);
        let result = cli.rank_source(FixedRank(Rank::Senior));
        assert!(matches!(result, Err(PayrollError::Common(payroll_common::Error::Json(_)))));
    }
}
