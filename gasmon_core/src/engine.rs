//! Swap detection over the device's monotonic swap counter.
//!
//! The tracker has two phases, encoded by `last_known_swap_count`:
//! - `None`: uninitialized, the next sample only establishes a baseline.
//! - `Some(n)`: tracking; a strictly larger count is one swap.
//!
//! `SwapTracker::observe` is a pure transition: it returns the next tracker
//! value together with what happened, and never touches history or storage.
//! Applying the result is the job of `GasState`.
//!
//! Known limitations:
//! - A counter jump of more than one between polls is recorded as a single
//!   swap.
//! - A counter decrease (device reset) is ignored for detection; the baseline
//!   count stays where it was.

use crate::history::SwapRecord;
use crate::util::elapsed_days;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTracker {
    /// Persisted as `-1` while uninitialized.
    #[serde(
        default,
        serialize_with = "ser_count_sentinel",
        deserialize_with = "de_count_sentinel"
    )]
    pub last_known_swap_count: Option<i64>,
    /// Instant of the previous swap, or of first start if none was seen yet.
    #[serde(default)]
    pub last_swap_date: DateTime<Utc>,
    /// Most recent weight observed, used as the outgoing cylinder's final weight.
    #[serde(default)]
    pub last_recorded_weight: f64,
}

/// Outcome of one observation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// First sample ever; baseline established, no swap possible.
    Initialized,
    /// The counter increased: a swap was detected.
    Swapped(SwapRecord),
    /// Same or lower count: only the last weight moved.
    WeightUpdated,
}

impl SwapTracker {
    /// Fresh tracker; `started_at` is the baseline for the first swap's duration.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            last_known_swap_count: None,
            last_swap_date: started_at,
            last_recorded_weight: 0.0,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.last_known_swap_count.is_some()
    }

    /// Feed one (count, weight) sample observed at `now`.
    pub fn observe(
        &self,
        current_count: i64,
        current_weight: f64,
        now: DateTime<Utc>,
    ) -> (SwapTracker, Transition) {
        let Some(last_count) = self.last_known_swap_count else {
            let next = SwapTracker {
                last_known_swap_count: Some(current_count),
                last_recorded_weight: current_weight,
                ..*self
            };
            return (next, Transition::Initialized);
        };

        if current_count > last_count {
            let record = SwapRecord {
                id: uuid::Uuid::new_v4().to_string(),
                date: now,
                initial_weight: current_weight,
                final_weight: self.last_recorded_weight,
                duration_days: elapsed_days(self.last_swap_date, now),
            };
            let next = SwapTracker {
                last_known_swap_count: Some(current_count),
                last_swap_date: now,
                last_recorded_weight: current_weight,
            };
            return (next, Transition::Swapped(record));
        }

        let next = SwapTracker {
            last_recorded_weight: current_weight,
            ..*self
        };
        (next, Transition::WeightUpdated)
    }
}

fn ser_count_sentinel<S: Serializer>(v: &Option<i64>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(v.unwrap_or(-1))
}

fn de_count_sentinel<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let raw: Option<i64> = Option::deserialize(d)?;
    Ok(raw.filter(|n| *n >= 0))
}
