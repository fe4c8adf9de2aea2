// ─────────────────────────────────────────────────────────────────────
// Boiling Core — CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Command-line interface for the boiling heat solver.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Verbosity of the stderr event log.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    /// Per-restart GMRES residuals
    Trace,
    /// Assembly progress
    Debug,
    /// One line per solved time layer
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Axisymmetric boiling-vessel heat solver
#[derive(Parser)]
#[command(name = "boiling-cli", version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a case and write sampled temperatures
    Run(commands::run::RunArgs),
    /// Check a case configuration
    Validate(commands::validate::ValidateArgs),
    /// Print a case summary
    Info(commands::info::InfoArgs),
}

fn init_logging(level: LogLevel) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
