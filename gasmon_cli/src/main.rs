mod cli;
mod commands;
mod error_fmt;
mod logging;
mod render;

use clap::Parser;
use cli::{Cli, Commands, DEFAULT_CONFIG_PATH, JSON_MODE, SettingsCmd};
use error_fmt::{exit_code_for_error, format_error_json, humanize};
use gasmon_config::Config;
use gasmon_core::{JsonFileStore, Monitor, MonitorError, SettingsPatch};
use gasmon_traits::SystemClock;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("warning: color-eyre not installed: {e}");
    }
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn load_config(cli: &Cli) -> Result<Config, MonitorError> {
    let cfg = if cli.config.as_path() == Path::new(DEFAULT_CONFIG_PATH) && !cli.config.exists() {
        Config::default()
    } else {
        gasmon_config::load_file(&cli.config).map_err(|e| MonitorError::Config(e.to_string()))?
    };
    cfg.validate()
        .map_err(|e| MonitorError::Config(e.to_string()))?;
    Ok(cfg)
}

fn run(cli: Cli) -> eyre::Result<()> {
    let cfg = load_config(&cli)?;

    let level = cli
        .log_level
        .as_deref()
        .or(cfg.logging.level.as_deref())
        .unwrap_or("info");
    logging::init_tracing(cli.json, level, &cfg.logging)?;

    let state_path = cli
        .state
        .clone()
        .unwrap_or_else(|| cfg.storage.state_file.clone().into());
    tracing::debug!(config = %cli.config.display(), state = %state_path.display(), "starting");

    let mon = Monitor::open(
        JsonFileStore::new(state_path),
        SystemClock::new(),
        &SettingsPatch::from(&cfg.settings),
        cfg.readings.capacity,
    )?;

    match cli.cmd {
        Commands::Monitor { ticks } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            let flag = shutdown.clone();
            ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
                .map_err(|e| eyre::eyre!("failed to install Ctrl-C handler: {e}"))?;
            commands::monitor(&cfg, mon, ticks, cli.json, &shutdown)
        }
        Commands::Status => commands::status(&cfg, mon, cli.json),
        Commands::History => commands::history(&mon, cli.json),
        Commands::Readings { csv } => commands::readings(&mon, csv.as_deref(), cli.json),
        Commands::ExportHistory { csv } => commands::export_history(&mon, &csv),
        Commands::Settings { action } => match action {
            SettingsCmd::Show => commands::settings_show(&mon, cli.json),
            SettingsCmd::Set {
                tare_weight,
                net_weight,
                unit,
                update_interval_ms,
                theme,
            } => {
                let patch = SettingsPatch {
                    tare_weight,
                    net_weight,
                    unit,
                    update_interval_ms,
                    theme,
                };
                commands::settings_set(mon, &patch, cli.json)
            }
        },
        Commands::ClearHistory => commands::clear_history(mon, cli.json),
    }
}
