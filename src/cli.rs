//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_data::CsvKlineSource;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_strategy;
use crate::adapters::synthetic_data::{LiveFeedSimulator, RandomWalkSource, TrendingSource};
use crate::domain::engine::StrategyEngine;
use crate::domain::error::StratforgeError;
use crate::domain::results::BacktestResult;
use crate::domain::strategy::Strategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::{KlineFeed, KlineSource};

#[derive(Parser, Debug)]
#[command(name = "stratforge", about = "Rule-based trading strategy simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the bars come from.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Synthetic trending series (default, 1000 bars)
    Historical,
    /// Synthetic trendless random walk (500 bars)
    Random,
    /// CSV file named by `[data] klines_path` in the config
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a strategy over a batch of bars
    Backtest {
        #[arg(short, long)]
        strategy: PathBuf,
        #[arg(short, long, value_enum, default_value_t = DataMode::Historical)]
        mode: DataMode,
        /// Number of bars to simulate (overrides config)
        #[arg(short, long)]
        bars: Option<usize>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the full result JSON here
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// RNG seed for synthetic data (random otherwise)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Feed a strategy one bar at a time from the live-feed simulator
    Stream {
        #[arg(short, long)]
        strategy: PathBuf,
        /// Number of bars to pull from the feed
        #[arg(short, long, default_value_t = 100)]
        ticks: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Parse a strategy file and report anything suspicious
    Validate {
        #[arg(short, long)]
        strategy: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();

    let result = match cli.command {
        Command::Backtest {
            strategy,
            mode,
            bars,
            config,
            output,
            seed,
        } => run_backtest(&strategy, mode, bars, config.as_deref(), output.as_deref(), seed),
        Command::Stream {
            strategy,
            ticks,
            seed,
        } => run_stream(&strategy, ticks, seed),
        Command::Validate { strategy } => run_validate(&strategy),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

fn load_strategy(path: &Path) -> Result<Strategy, StratforgeError> {
    log::info!("loading strategy from {}", path.display());
    let strategy = json_strategy::load_strategy(path)?;
    for warning in json_strategy::lint(&strategy) {
        log::warn!("{}: {}", strategy.name, warning);
    }
    Ok(strategy)
}

fn run_backtest(
    strategy_path: &Path,
    mode: DataMode,
    bars: Option<usize>,
    config_path: Option<&Path>,
    output: Option<&Path>,
    seed: Option<u64>,
) -> Result<(), StratforgeError> {
    let strategy = load_strategy(strategy_path)?;
    let config = config_path.map(FileConfigAdapter::from_file).transpose()?;

    let default_bars = match mode {
        DataMode::Random => 500,
        DataMode::Historical | DataMode::Csv => 1000,
    };
    let bars = match (bars, &config) {
        (Some(n), _) => n,
        (None, Some(cfg)) => cfg.get_int("backtest", "bars", default_bars as i64)? as usize,
        (None, None) => default_bars,
    };
    let seed = seed.unwrap_or_else(rand::random);

    log::info!("generating {mode:?} kline data ({bars} bars, seed {seed})");
    let source: Box<dyn KlineSource> = match mode {
        DataMode::Historical => Box::new(TrendingSource::new(seed)),
        DataMode::Random => Box::new(RandomWalkSource::new(seed)),
        DataMode::Csv => {
            let cfg = config.as_ref().ok_or_else(|| StratforgeError::ConfigMissing {
                section: "data".into(),
                key: "klines_path".into(),
            })?;
            let path = cfg.get_string("data", "klines_path").ok_or_else(|| {
                StratforgeError::ConfigMissing {
                    section: "data".into(),
                    key: "klines_path".into(),
                }
            })?;
            Box::new(CsvKlineSource::new(PathBuf::from(path)))
        }
    };
    let klines = source.fetch_klines(&strategy.market, &strategy.timeframe, bars)?;

    log::info!("simulating {} bars", klines.len());
    let mut engine = StrategyEngine::new(strategy, klines);
    engine.run();
    let result = engine.results();

    print_summary(&result);
    if let Some(path) = output {
        json_strategy::save_result(path, &result)?;
        log::info!("full result written to {}", path.display());
    }
    Ok(())
}

fn run_stream(strategy_path: &Path, ticks: usize, seed: Option<u64>) -> Result<(), StratforgeError> {
    let strategy = load_strategy(strategy_path)?;
    let seed = seed.unwrap_or_else(rand::random);

    log::info!("streaming {ticks} bars from the feed simulator (seed {seed})");
    let mut feed = LiveFeedSimulator::new(seed, 2_000);
    let mut engine = StrategyEngine::new(strategy, Vec::new());
    for _ in 0..ticks {
        match feed.next_kline()? {
            Some(kline) => engine.process_kline(kline),
            None => break,
        }
    }

    print_summary(&engine.results());
    Ok(())
}

fn run_validate(strategy_path: &Path) -> Result<(), StratforgeError> {
    let strategy = json_strategy::load_strategy(strategy_path)?;
    println!("{} ({})", strategy.name, strategy.id);
    println!("  market:    {} @ {}", strategy.market, strategy.timeframe);
    println!("  side:      {:?}", strategy.side);
    println!(
        "  entries:   {} group(s), exits: {} group(s)",
        strategy.entry_conditions.len(),
        strategy.exit_conditions.len()
    );
    let warnings = json_strategy::lint(&strategy);
    if warnings.is_empty() {
        println!("  no warnings");
    } else {
        for warning in &warnings {
            println!("  warning: {warning}");
        }
    }
    Ok(())
}

fn print_summary(result: &BacktestResult) {
    println!("trades:      {}", result.total_trades);
    println!("win rate:    {:.2}%", result.win_rate);
    println!("profit/loss: {:.2}%", result.profit_loss);
    if let Some(last) = result.performance_data.last() {
        println!("equity:      {:.2}", last.equity);
    }
}
