//! The persisted state document and the mutations allowed on it.
//!
//! Layout on disk (JSON):
//! `{ settings, history, readings, lastKnownSwapCount, lastSwapDate, lastRecordedWeight }`.
//! Missing fields take defaults and unknown fields are ignored, so older and
//! newer documents both load.

use crate::engine::{SwapTracker, Transition};
use crate::error::MonitorError;
use crate::history::{SwapHistory, SwapRecord};
use crate::readings::ReadingBuffer;
use crate::settings::{Settings, SettingsPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GasState {
    pub settings: Settings,
    history: SwapHistory,
    readings: ReadingBuffer,
    #[serde(flatten)]
    tracker: SwapTracker,
}

impl Default for GasState {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::default())
    }
}

impl GasState {
    /// Fresh state for a first run started at `started_at`.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            settings: Settings::default(),
            history: SwapHistory::new(),
            readings: ReadingBuffer::default(),
            tracker: SwapTracker::new(started_at),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_readings_capacity(mut self, capacity: usize) -> Self {
        self.readings.set_capacity(capacity);
        self
    }

    pub fn history(&self) -> &SwapHistory {
        &self.history
    }

    pub fn readings(&self) -> &ReadingBuffer {
        &self.readings
    }

    pub fn tracker(&self) -> &SwapTracker {
        &self.tracker
    }

    /// Run the swap engine on one sample and apply its outcome.
    /// Returns the new record when a swap was detected.
    pub fn observe(
        &mut self,
        current_count: i64,
        current_weight: f64,
        now: DateTime<Utc>,
    ) -> Option<&SwapRecord> {
        let (next, transition) = self.tracker.observe(current_count, current_weight, now);
        self.tracker = next;
        match transition {
            Transition::Swapped(record) => {
                self.history.prepend(record);
                self.history.newest()
            }
            Transition::Initialized | Transition::WeightUpdated => None,
        }
    }

    pub fn add_reading(&mut self, weight: f64, timestamp_ms: i64) {
        self.readings.append(weight, timestamp_ms);
    }

    /// Empty history and readings. Tracker baselines survive so the next
    /// swap still measures from the last real one.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.readings.clear();
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<&Settings, MonitorError> {
        self.settings = self.settings.merged(patch)?;
        Ok(&self.settings)
    }
}
