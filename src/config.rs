//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser};
use rusty_money::{Money, iso::Currency};

use crate::{
    fixtures::menus::parse_price,
    solvers::knapsack::{DEFAULT_MAX_SOLUTIONS, KnapsackSolver},
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Find the fewest top-ups needed to spend a balance exactly on a menu
#[derive(Debug, Parser)]
#[command(name = "spendable", version, about, long_about = None)]
pub struct SolveArgs {
    /// Starting balance (e.g. "3.00 USD")
    #[arg(short, long, env = "SPENDABLE_BALANCE", value_parser = parse_price)]
    pub balance: Money<'static, Currency>,

    /// Menu fixture name, loaded from `<fixtures>/menus/<menu>.yml`
    #[arg(short, long, env = "SPENDABLE_MENU", default_value = "cafe")]
    pub menu: String,

    /// Fixture base directory
    #[arg(long, env = "SPENDABLE_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Top-up amount, overriding the menu file (e.g. "10.00 USD")
    #[arg(short, long, env = "SPENDABLE_TOP_UP", value_parser = parse_price)]
    pub top_up: Option<Money<'static, Currency>>,

    /// Maximum number of top-ups, overriding the menu file
    #[arg(long, env = "SPENDABLE_MAX_TOP_UPS")]
    pub max_top_ups: Option<u32>,

    /// Maximum number of distinct combinations to list
    #[arg(long, env = "SPENDABLE_MAX_SOLUTIONS", default_value_t = DEFAULT_MAX_SOLUTIONS)]
    pub max_solutions: usize,

    /// Accept buying nothing when the balance is already zero
    #[arg(long, env = "SPENDABLE_ALLOW_EMPTY", default_value_t = false)]
    pub allow_empty: bool,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl SolveArgs {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Solver configured from these arguments
    pub fn solver(&self) -> KnapsackSolver {
        KnapsackSolver::new()
            .with_max_solutions(self.max_solutions)
            .with_allow_empty(self.allow_empty)
    }
}
