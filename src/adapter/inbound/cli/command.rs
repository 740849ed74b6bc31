//! Command-line interface definitions.
//!
//! Defines the CLI structure for arbscope using `clap`. Subcommands run the
//! full threshold sweep, list raw opportunities for one symbol, and validate
//! configuration files.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::domain::CommissionModel;

/// Cross-exchange arbitrage detection and backtesting over historical quotes
#[derive(Parser, Debug)]
#[command(name = "arbscope")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the arbscope CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect opportunities and replay them across every profit threshold
    Run(Box<RunArgs>),

    /// List detected opportunities for one symbol without simulating
    Opportunities(OpportunitiesArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `arbscope check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate a configuration file and print the effective settings.
    Config(ConfigPathArg),
}

/// Config file argument shared by commands.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to a TOML configuration file (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Command-line commission model selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CommissionModelArg {
    /// Commission charged once per opportunity
    MakerTaker,
    /// Commission charged on both legs
    TakerTaker,
}

impl From<CommissionModelArg> for CommissionModel {
    fn from(arg: CommissionModelArg) -> Self {
        match arg {
            CommissionModelArg::MakerTaker => Self::MakerTaker,
            CommissionModelArg::TakerTaker => Self::TakerTaker,
        }
    }
}

/// Data selection overrides shared by `run` and `opportunities`.
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// Quote file or directory of `*.jsonl` files
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Exchanges to keep (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exchanges: Vec<String>,

    /// Inclusive start (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,

    /// Exclusive end (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub end: Option<String>,
}

/// Logging overrides shared by commands that load data.
#[derive(Args, Debug, Default)]
pub struct LogArgs {
    /// Log level filter (e.g. warn, info, arbscope=debug)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `arbscope run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Symbols to keep (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Commission percentage per charged leg
    #[arg(long)]
    pub commission: Option<f64>,

    /// How commission is charged per opportunity
    #[arg(long, value_enum)]
    pub commission_model: Option<CommissionModelArg>,

    /// Minimum net profit percentages to simulate (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub thresholds: Vec<Decimal>,

    /// Quote currency granted to each exchange wallet
    #[arg(long)]
    pub initial_balance: Option<f64>,

    /// Fraction of the initial balance converted into base currency
    #[arg(long)]
    pub swap_ratio: Option<f64>,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Write every executed trade to a CSV file
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Write every executed trade to a JSON Lines file
    #[arg(long, value_name = "PATH")]
    pub export_jsonl: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Arguments for `arbscope opportunities`.
#[derive(Args, Debug)]
pub struct OpportunitiesArgs {
    /// Symbol to scan
    #[arg(short, long)]
    pub symbol: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Commission percentage per charged leg
    #[arg(long)]
    pub commission: Option<f64>,

    /// How commission is charged per opportunity
    #[arg(long, value_enum)]
    pub commission_model: Option<CommissionModelArg>,

    /// Only list opportunities at or above this net profit percentage
    #[arg(long)]
    pub min_profit: Option<f64>,

    /// Maximum rows to print (0 prints all)
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    #[command(flatten)]
    pub log: LogArgs,
}
