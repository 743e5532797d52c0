//! Command-line front end over the forecasting services.

pub mod commands;
pub mod output;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::config::ConfigManager;
use crate::errors::CashcastError;

pub use output::{MessageKind, OutputPreferences};

#[derive(Debug, Parser)]
#[command(name = "cashcast")]
#[command(about = "Project daily account balances from bills and transactions", long_about = None)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Disable colored output regardless of configuration
    #[arg(long, global = true, default_value_t = false)]
    pub no_color: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the dates a recurrence rule produces
    Expand {
        /// First occurrence (YYYY-MM-DD)
        #[arg(long)]
        anchor: NaiveDate,

        /// NONE, DAILY, WEEKLY, MONTHLY, YEARLY or EOM
        #[arg(long)]
        rule: Option<String>,

        /// Last date that may be produced
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Project daily balances for an account
    Forecast(ForecastArgs),

    /// Show only the days whose balance falls below the buffer
    Alerts(ForecastArgs),

    /// View and change stored preferences
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ForecastArgs {
    /// Portfolio snapshot (JSON); defaults to the configured snapshot
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Account to forecast
    #[arg(long)]
    pub account: Uuid,

    /// Horizon in 30-day months (1-12)
    #[arg(long)]
    pub months: Option<u32>,

    /// Horizon in days
    #[arg(long, conflicts_with = "months")]
    pub days: Option<u32>,

    /// Alert threshold; defaults to the configured buffer
    #[arg(long)]
    pub buffer: Option<f64>,

    /// Day 0 of the forecast; defaults to the current date
    #[arg(long)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCmd {
    /// Print the stored configuration
    Show,
    /// Set the default alert buffer
    SetBuffer { amount: f64 },
    /// Set the default horizon in months
    SetMonths { months: u32 },
    /// Set the snapshot used when --snapshot is omitted
    SetSnapshot { path: PathBuf },
}

/// Parses process arguments and runs the selected command against stdout.
pub fn run_cli() -> Result<(), CashcastError> {
    let cli = Cli::parse();
    let manager = ConfigManager::from_env()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &manager, &mut out)
}

pub fn run(cli: Cli, manager: &ConfigManager, out: &mut dyn Write) -> Result<(), CashcastError> {
    let config = manager.load()?;
    let prefs = OutputPreferences {
        color: config.ui_color_enabled && !cli.no_color && !cli.json,
    };
    if !prefs.color {
        colored::control::set_override(false);
    }

    match cli.cmd {
        Commands::Expand { anchor, rule, end } => {
            commands::expand::run(anchor, rule.as_deref(), end, cli.json, out)
        }
        Commands::Forecast(args) => {
            commands::forecast::run_forecast(&args, &config, cli.json, &prefs, out)
        }
        Commands::Alerts(args) => {
            commands::forecast::run_alerts(&args, &config, cli.json, &prefs, out)
        }
        Commands::Config { cmd } => commands::config::run(cmd, manager, cli.json, &prefs, out),
    }
}
