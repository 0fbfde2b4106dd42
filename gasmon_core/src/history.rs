//! Swap records and the newest-first history that holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One detected cylinder swap. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRecord {
    pub id: String,
    /// Detection instant (local clock).
    pub date: DateTime<Utc>,
    /// First weight seen for the incoming cylinder.
    pub initial_weight: f64,
    /// Last weight seen for the outgoing cylinder.
    pub final_weight: f64,
    /// Days since the previous swap, one decimal, never negative.
    pub duration_days: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwapHistory {
    records: VecDeque<SwapRecord>,
}

impl SwapHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front so iteration stays newest-first.
    pub fn prepend(&mut self, record: SwapRecord) {
        self.records.push_front(record);
    }

    pub fn newest(&self) -> Option<&SwapRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwapRecord> {
        self.records.iter()
    }

    /// Mean duration over all records, if any.
    pub fn average_duration_days(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let total: f64 = self.records.iter().map(|r| r.duration_days).sum();
        Some(crate::util::round1(total / self.records.len() as f64))
    }
}
