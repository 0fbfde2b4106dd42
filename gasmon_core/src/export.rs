//! CSV export of the chart series and the swap history.

use crate::history::SwapHistory;
use crate::readings::ReadingBuffer;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ReadingRow {
    timestamp_ms: i64,
    weight: f64,
}

#[derive(Serialize)]
struct SwapRow<'a> {
    id: &'a str,
    date: String,
    initial_weight: f64,
    final_weight: f64,
    duration_days: f64,
}

/// Readings oldest first, header `timestamp_ms,weight`.
pub fn write_readings_csv<W: Write>(readings: &ReadingBuffer, out: W) -> eyre::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for r in readings {
        wtr.serialize(ReadingRow {
            timestamp_ms: r.timestamp,
            weight: r.weight,
        })?;
    }
    if readings.is_empty() {
        wtr.write_record(["timestamp_ms", "weight"])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Swaps newest first, dates in RFC 3339.
pub fn write_history_csv<W: Write>(history: &SwapHistory, out: W) -> eyre::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for rec in history.iter() {
        wtr.serialize(SwapRow {
            id: &rec.id,
            date: rec.date.to_rfc3339(),
            initial_weight: rec.initial_weight,
            final_weight: rec.final_weight,
            duration_days: rec.duration_days,
        })?;
    }
    if history.is_empty() {
        wtr.write_record([
            "id",
            "date",
            "initial_weight",
            "final_weight",
            "duration_days",
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
