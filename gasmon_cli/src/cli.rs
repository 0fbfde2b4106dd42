//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use gasmon_config::{Theme, Unit};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub const DEFAULT_CONFIG_PATH: &str = "etc/gasmon.toml";

#[derive(Parser, Debug)]
#[command(name = "gasmon", version, about = "Gas cylinder weight monitor")]
pub struct Cli {
    /// Path to config TOML (typed). A missing default file means built-in defaults.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Print results and logs as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging] level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// State file; overrides [storage] state_file
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the sensor continuously and track swaps
    Monitor {
        /// Stop after this many polls (default: run until Ctrl-C)
        #[arg(long, value_name = "N")]
        ticks: Option<u64>,
    },
    /// Poll once and show the status card and link health
    Status,
    /// Show the swap history, newest first
    History,
    /// Show the recent weight readings, oldest first
    Readings {
        /// Write the readings to this CSV file instead of printing them
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
    /// Write the swap history to a CSV file
    ExportHistory {
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
    /// Show or change the monitor settings
    Settings {
        #[command(subcommand)]
        action: SettingsCmd,
    },
    /// Delete the swap history and the recent readings
    ClearHistory,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCmd {
    /// Print the current settings
    Show,
    /// Change one or more settings
    Set {
        /// Empty cylinder weight (kg)
        #[arg(long, value_name = "KG")]
        tare_weight: Option<f64>,
        /// Gas weight of a full cylinder (kg)
        #[arg(long, value_name = "KG")]
        net_weight: Option<f64>,
        /// Display unit: kg or lb
        #[arg(long, value_name = "UNIT")]
        unit: Option<Unit>,
        /// Polling interval in ms (>= 500)
        #[arg(long, value_name = "MS")]
        update_interval_ms: Option<u64>,
        /// light or dark
        #[arg(long, value_name = "THEME")]
        theme: Option<Theme>,
    },
}
