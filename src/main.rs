use clap::Parser;
use parmaster_payroll::{cli, config, error, export, payroll, rank_prompt, scanner};
use cli::Cli;
use config::Config;
use error::{PayrollError, Result};
use payroll::RunOptions;
use payroll_common::FixedRank;
use rank_prompt::PromptRank;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn wait_for_enter() {
    println!("\nНажмите Enter для выхода...");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let interactive = !cli.non_interactive;

    if let Err(e) = run(cli) {
        eprintln!("✖ {}", e);
        if interactive && matches!(e, PayrollError::MissingInputs(_)) {
            wait_for_enter();
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    if cli.init_config {
        config.save()?;
        println!("✔ Настройки сохранены: {}", Config::config_path()?.display());
        return Ok(());
    }

    let options = RunOptions {
        interactive: !cli.non_interactive,
        output_dir: cli.output_dir.clone(),
    };

    println!("🧖 parmaster-payroll - расчёт зарплаты\n");

    println!("[1/4] Поиск выгрузок в {}...", cli.input_dir.display());
    let inputs = scanner::discover_inputs(&cli.input_dir, &config.patterns)?;
    for file in inputs.all() {
        println!("  - {}", file.display());
    }
    let token = export::report_token(&inputs.collective);
    println!("✔ Выгрузка от {}\n", token);

    println!("[2/4] Расчёт...");
    let report = if options.interactive {
        let mut ranks = cli.rank_source(PromptRank::with_default(config.default_rank))?;
        payroll::run_payroll(&inputs, config.header_row, &mut ranks)?
    } else {
        let mut ranks = cli.rank_source(FixedRank(config.default_rank))?;
        payroll::run_payroll(&inputs, config.header_row, &mut ranks)?
    };
    println!(
        "✔ {} пармастеров, котёл за смену: {}\n",
        report.rows.len(),
        report.cauldron_unit.round_dp(2)
    );

    println!("[3/4] Запись отчёта...");
    let report_dir = options.report_dir(&cli.input_dir, &token);
    let report_path = export::report_path(&report_dir, &config.report_prefix, &token);
    export::excel::write_report(&report, &report_path)?;
    println!("✔ Отчёт: {}\n", report_path.display());

    if options.interactive {
        println!("[4/4] Перенос выгрузок...");
        let archive_dir = cli.input_dir.join(&token);
        let moved = export::archive::archive_inputs(&inputs.all(), &archive_dir)?;
        println!("✔ {} файла перенесены в {}", moved.len(), archive_dir.display());
    } else {
        println!("[4/4] Выгрузки остаются на месте");
    }

    println!("\n✅ Готово");
    Ok(())
}
