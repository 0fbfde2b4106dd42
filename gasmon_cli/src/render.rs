//! Text and JSON presentation of monitor data.

use chrono::{DateTime, Utc};
use gasmon_config::Unit;
use gasmon_core::{
    Connectivity, Dashboard, ReadingBuffer, Settings, StatusCard, SwapHistory, TickOutcome,
};
use serde_json::{Value, json};

pub const NO_HISTORY: &str = "No swap history recorded.";
pub const NO_READINGS: &str = "No readings recorded.";

fn utc_time(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn device_time(epoch_s: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_s, 0)
        .map_or_else(|| "--".to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

pub fn card_text(card: &StatusCard) -> String {
    let sym = card.unit.symbol();
    format!(
        "{:.2} {sym} total, {:.2} {sym} gas ({:.1}%) {}",
        card.total_weight, card.gas_weight, card.percentage, card.label
    )
}

pub fn card_json(card: &StatusCard) -> Value {
    json!({
        "total_weight": card.total_weight,
        "gas_weight": card.gas_weight,
        "percentage": card.percentage,
        "tier": card.tier,
        "label": card.label,
        "color": card.color,
        "unit": card.unit,
    })
}

pub fn panel_text(conn: &Connectivity) -> String {
    let link = if conn.connected {
        format!("Link: online ({} ms)", conn.latency_ms)
    } else {
        match conn.last_error.as_deref() {
            Some(e) => format!("Link: offline ({e})"),
            None => "Link: offline".to_string(),
        }
    };
    match conn.last_status {
        Some(s) => format!(
            "{link}\nDevice: {:.2} kg raw, swap counter {}, last update {}",
            s.weight_kg,
            s.gas_swap_count,
            device_time(s.last_update)
        ),
        None => link,
    }
}

pub fn panel_json(conn: &Connectivity) -> Value {
    json!({
        "connected": conn.connected,
        "latency_ms": conn.latency_ms,
        "last_error": conn.last_error,
        "raw": conn.last_status.map(|s| json!({
            "weightKg": s.weight_kg,
            "gasSwapCount": s.gas_swap_count,
            "lastUpdate": s.last_update,
        })),
    })
}

/// One line per monitor tick.
pub fn tick_text(dash: &Dashboard<'_>, outcome: &TickOutcome) -> String {
    let at = dash
        .connectivity
        .last_poll_ms
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(|| "--".to_string(), |dt| dt.format("%H:%M:%S").to_string());
    let card = dash
        .card
        .as_ref()
        .map_or_else(|| "no reading yet".to_string(), card_text);
    let link = if dash.connectivity.connected {
        format!("online {} ms", dash.connectivity.latency_ms)
    } else {
        "offline".to_string()
    };
    let mut line = format!("[{at}] {card} | swaps: {} | {link}", dash.history.len());
    if let TickOutcome::Swapped(rec) = outcome {
        line.push_str(&format!(
            " | SWAP detected after {} days",
            rec.duration_days
        ));
    }
    line
}

pub fn tick_json(dash: &Dashboard<'_>, outcome: &TickOutcome) -> Value {
    let (event, swap) = match outcome {
        TickOutcome::Swapped(rec) => ("swap", Some(rec)),
        TickOutcome::Sampled => ("sample", None),
        TickOutcome::Missed => ("miss", None),
    };
    json!({
        "ts_ms": dash.connectivity.last_poll_ms,
        "event": event,
        "card": dash.card.as_ref().map(card_json),
        "link": panel_json(dash.connectivity),
        "swaps": dash.history.len(),
        "swap": swap,
    })
}

pub fn history_text(history: &SwapHistory, unit: Unit) -> String {
    if history.is_empty() {
        return NO_HISTORY.to_string();
    }
    let sym = unit.symbol();
    let mut out = format!(
        "{:<20} {:>14} {:>14} {:>10}\n",
        "Date", "Initial", "Final (old)", "Duration"
    );
    for rec in history.iter() {
        out.push_str(&format!(
            "{:<20} {:>11.2} {sym} {:>11.2} {sym} {:>5} days\n",
            utc_time(rec.date),
            unit.convert_from_kg(rec.initial_weight),
            unit.convert_from_kg(rec.final_weight),
            rec.duration_days
        ));
    }
    if let Some(avg) = history.average_duration_days() {
        out.push_str(&format!("Average duration: {avg} days\n"));
    }
    out
}

pub fn readings_text(readings: &ReadingBuffer, unit: Unit) -> String {
    if readings.is_empty() {
        return NO_READINGS.to_string();
    }
    let sym = unit.symbol();
    readings
        .iter()
        .map(|r| {
            let at = DateTime::<Utc>::from_timestamp_millis(r.timestamp)
                .map_or_else(|| r.timestamp.to_string(), |dt| dt.format("%H:%M:%S").to_string());
            format!("{at} {:.2} {sym}", unit.convert_from_kg(r.weight))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn settings_text(s: &Settings) -> String {
    format!(
        "tare_weight        = {} kg\nnet_weight         = {} kg\nunit               = {}\nupdate_interval_ms = {}\ntheme              = {}",
        s.tare_weight,
        s.net_weight,
        s.unit.symbol(),
        s.update_interval_ms,
        match s.theme {
            gasmon_config::Theme::Light => "light",
            gasmon_config::Theme::Dark => "dark",
        }
    )
}
