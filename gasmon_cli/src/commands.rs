//! Command implementations. Each takes an opened monitor and prints to stdout.

use crate::render;
use eyre::WrapErr;
use gasmon_config::{Config, SourceKind};
use gasmon_core::{
    JsonFileStore, Monitor, MonitorError, PollEvent, Poller, SettingsPatch, poll_once,
};
use gasmon_source::{HttpStatusSource, SimulatedSource};
use gasmon_traits::{StatusSource, SystemClock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub type AppMonitor = Monitor<JsonFileStore, SystemClock>;

/// How long the monitor loop waits on the poller before rechecking Ctrl-C.
const SHUTDOWN_CHECK: Duration = Duration::from_millis(200);

pub fn build_source(cfg: &Config, mon: &AppMonitor) -> eyre::Result<Box<dyn StatusSource + Send>> {
    Ok(match cfg.source.kind {
        SourceKind::Http => {
            let timeout = Duration::from_millis(cfg.source.timeout_ms);
            let src = HttpStatusSource::new(&cfg.source.url, timeout)
                .map_err(|e| MonitorError::Transport(e.to_string()))?;
            tracing::debug!(url = src.status_url(), "using http source");
            Box::new(src)
        }
        SourceKind::Sim => {
            let s = mon.settings();
            tracing::debug!("using simulated source");
            Box::new(SimulatedSource::new(s.tare_weight, s.net_weight))
        }
    })
}

/// Push a settings-file interval edit into the running poller.
fn follow_interval(poller: &Poller, mon: &AppMonitor) {
    if poller.sync_interval(mon.settings().update_interval_ms) {
        tracing::info!(interval_ms = poller.interval_ms(), "poll interval changed");
    }
}

fn print_json(v: &serde_json::Value) {
    println!("{v}");
}

pub fn monitor(
    cfg: &Config,
    mut mon: AppMonitor,
    ticks: Option<u64>,
    json: bool,
    shutdown: &Arc<AtomicBool>,
) -> eyre::Result<()> {
    let source = build_source(cfg, &mon)?;
    let timeout = Duration::from_millis(cfg.source.timeout_ms);
    let poller = Poller::spawn(
        source,
        SystemClock::new(),
        mon.settings().update_interval_ms,
        timeout,
    );
    tracing::info!(
        interval_ms = poller.interval_ms(),
        ticks = ?ticks,
        "monitor start"
    );

    let mut done = 0u64;
    while !shutdown.load(Ordering::Relaxed) {
        let Some(event) = poller.recv_timeout(SHUTDOWN_CHECK) else {
            continue;
        };
        let outcome = mon.apply(event);
        follow_interval(&poller, &mon);
        let dash = mon.dashboard();
        if json {
            print_json(&render::tick_json(&dash, &outcome));
        } else {
            println!("{}", render::tick_text(&dash, &outcome));
        }
        done += 1;
        if let Some(n) = ticks
            && done >= n
        {
            break;
        }
    }
    poller.stop();
    tracing::info!(ticks = done, swaps = mon.state().history().len(), "monitor stop");
    Ok(())
}

pub fn status(cfg: &Config, mut mon: AppMonitor, json: bool) -> eyre::Result<()> {
    let mut source = build_source(cfg, &mon)?;
    let timeout = Duration::from_millis(cfg.source.timeout_ms);
    let event = poll_once(&mut source, &SystemClock::new(), timeout);
    let miss = match &event {
        PollEvent::Miss { error, .. } => Some(error.clone()),
        PollEvent::Sample { .. } => None,
    };
    mon.apply(event);

    let dash = mon.dashboard();
    if json {
        print_json(&serde_json::json!({
            "card": dash.card.as_ref().map(render::card_json),
            "link": render::panel_json(dash.connectivity),
            "swaps": dash.history.len(),
        }));
    } else {
        match dash.card.as_ref() {
            Some(card) => println!("{}", render::card_text(card)),
            None => println!("No reading available."),
        }
        println!("{}", render::panel_text(dash.connectivity));
    }

    match miss {
        Some(error) => Err(MonitorError::Transport(error).into()),
        None => Ok(()),
    }
}

pub fn history(mon: &AppMonitor, json: bool) -> eyre::Result<()> {
    let history = mon.state().history();
    if json {
        print_json(&serde_json::json!({
            "history": history,
            "average_duration_days": history.average_duration_days(),
        }));
    } else {
        println!("{}", render::history_text(history, mon.settings().unit).trim_end());
    }
    Ok(())
}

pub fn readings(mon: &AppMonitor, csv: Option<&std::path::Path>, json: bool) -> eyre::Result<()> {
    let readings = mon.state().readings();
    if let Some(path) = csv {
        let file = std::fs::File::create(path)
            .wrap_err_with(|| format!("create {}", path.display()))?;
        gasmon_core::export::write_readings_csv(readings, file)?;
        tracing::info!(path = %path.display(), rows = readings.len(), "readings exported");
        return Ok(());
    }
    if json {
        print_json(&serde_json::json!({ "readings": readings }));
    } else {
        println!("{}", render::readings_text(readings, mon.settings().unit));
    }
    Ok(())
}

pub fn export_history(mon: &AppMonitor, path: &std::path::Path) -> eyre::Result<()> {
    let history = mon.state().history();
    let file =
        std::fs::File::create(path).wrap_err_with(|| format!("create {}", path.display()))?;
    gasmon_core::export::write_history_csv(history, file)?;
    tracing::info!(path = %path.display(), rows = history.len(), "history exported");
    Ok(())
}

pub fn settings_show(mon: &AppMonitor, json: bool) -> eyre::Result<()> {
    if json {
        print_json(&serde_json::to_value(mon.settings())?);
    } else {
        println!("{}", render::settings_text(mon.settings()));
    }
    Ok(())
}

pub fn settings_set(mut mon: AppMonitor, patch: &SettingsPatch, json: bool) -> eyre::Result<()> {
    if patch.is_empty() {
        return Err(MonitorError::Settings(
            "no setting given; see `gasmon settings set --help`".into(),
        )
        .into());
    }
    let updated = mon.update_settings(patch)?;
    if json {
        print_json(&serde_json::to_value(updated)?);
    } else {
        println!("{}", render::settings_text(&updated));
    }
    Ok(())
}

pub fn clear_history(mut mon: AppMonitor, json: bool) -> eyre::Result<()> {
    mon.clear_history()?;
    if json {
        print_json(&serde_json::json!({ "cleared": true }));
    } else {
        println!("History cleared.");
    }
    Ok(())
}
