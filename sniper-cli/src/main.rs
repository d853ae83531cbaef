//! Sniper CLI — run the signal engine over a simulated session, or print the
//! default configuration.
//!
//! Commands:
//! - `run` — feed N simulated bars through the engine and print a summary
//! - `defaults` — print the default engine configuration as TOML

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sniper_core::engine::{ConfigUpdate, EngineConfig, EngineEvent, SniperEngine};
use sniper_core::feed::SimulatedFeed;
use sniper_core::fingerprint::ConfigFingerprint;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sniper", about = "Crude-oil trading-signal engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed simulated bars through the engine and print the session summary.
    Run {
        /// Instrument symbol.
        #[arg(long, default_value = "/CL")]
        symbol: String,

        /// Number of one-minute bars to simulate.
        #[arg(long, default_value_t = 1000)]
        bars: usize,

        /// Feed seed; the same seed reproduces the same session.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// TOML file with configuration overrides (partial, defaults apply).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print every engine event as a JSON line.
        #[arg(long, default_value_t = false)]
        events: bool,
    },
    /// Print the default engine configuration as TOML.
    Defaults,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            symbol,
            bars,
            seed,
            config,
            events,
        } => run_session(symbol, bars, seed, config, events),
        Commands::Defaults => print_defaults(),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let base = EngineConfig::default();
    let Some(path) = path else {
        return Ok(base);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let update: ConfigUpdate =
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let config = base.with_update(&update)?;
    Ok(config)
}

fn run_session(
    symbol: String,
    bars: usize,
    seed: u64,
    config_path: Option<PathBuf>,
    print_events: bool,
) -> Result<()> {
    let config = load_config(config_path.as_ref())?;
    let fingerprint = ConfigFingerprint::of(&config);
    info!(%symbol, bars, seed, config = fingerprint.short(), "starting simulated session");

    let mut engine = SniperEngine::new(symbol.clone(), config)?;
    let rx = engine.subscribe();
    engine.start();

    let mut feed = SimulatedFeed::new(seed);
    for _ in 0..bars {
        let (bar, context) = feed.next_bar();
        engine.update_context(context);
        engine.on_bar(bar);

        if print_events {
            for event in rx.try_iter() {
                if let Ok(line) = serde_json::to_string(&event) {
                    println!("{line}");
                }
            }
        }
    }

    // Count signals before draining the channel for good.
    let signals = rx
        .try_iter()
        .filter(|e| matches!(e, EngineEvent::TradingSignal(_)))
        .count();

    let status = engine.status();
    let history = engine.history();
    let metrics = &history.metrics;

    println!("── Session summary ──────────────────────────");
    println!("symbol        {symbol}");
    println!("config        {}", fingerprint.short());
    println!("bars          {bars} (seed {seed})");
    println!("last price    {:.2}", status.price);
    println!("mode          {}", status.mode);
    println!("confidence    {:.3}", status.confidence);
    if print_events {
        println!("signals       (streamed above)");
    } else {
        println!("late signals  {signals}");
    }
    println!("── Performance ──────────────────────────────");
    println!("trades        {}", metrics.total_trades);
    println!(
        "wins/losses   {}/{}",
        metrics.winning_trades, metrics.losing_trades
    );
    println!("win rate      {:.1}%", metrics.win_rate * 100.0);
    println!("total pnl     ${:.2}", metrics.total_pnl);
    println!("avg win       ${:.2}", metrics.average_win);
    println!("avg loss      ${:.2}", metrics.average_loss);
    println!("profit factor {:.2}", metrics.profit_factor);
    println!("expectancy    ${:.2}", metrics.expectancy);
    println!("max drawdown  ${:.2}", metrics.max_drawdown);
    println!("open          {}", status.open_positions.len());

    Ok(())
}

fn print_defaults() -> Result<()> {
    let toml = toml::to_string_pretty(&EngineConfig::default())?;
    print!("{toml}");
    Ok(())
}
