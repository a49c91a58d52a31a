use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use jodi_sniper::backtest::{BacktestSummary, Backtester, validate};
use jodi_sniper::data::{load_history, read_log, summarize, write_snapshot};
use jodi_sniper::{Cli, Command, ForecastEngine};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Load config and history
    let config = args.analysis_config()?;
    let history = load_history(&args.data, config.draw_calendar())?;
    let engine = ForecastEngine::new(config);

    // D. Dispatch
    match args.command.clone().unwrap_or(Command::Analyze) {
        Command::Analyze => {
            let mut rng = match engine.config.monte_carlo.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let report = engine.daily_report(&history, &mut rng);
            report.log_summary();
            if let Some(path) = write_snapshot(&report, &args.reports_dir)? {
                log::info!("💾 Snapshot saved to {}", path.display());
            }
        }
        Command::Backtest { warmup } => {
            let warmup = warmup.unwrap_or(engine.config.backtest.warmup);
            let rows = Backtester::new(&engine).run(&history, warmup);
            BacktestSummary::from_rows(&rows, engine.config.backtest.confidence_level).log_summary();
        }
        Command::Validate { log: log_path } => {
            if validate(&history, &args.reports_dir, &log_path)?.is_none() {
                log::info!("No validation row written");
            }
            summarize(&read_log(&log_path)?).log_summary();
        }
    }

    Ok(())
}
