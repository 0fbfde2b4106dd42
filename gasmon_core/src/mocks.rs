//! Test and helper sources for gasmon_core

use gasmon_traits::{DeviceStatus, StatusSource};
use std::collections::VecDeque;

/// A source that always fails, as if the endpoint were unreachable.
pub struct OfflineSource;

impl StatusSource for OfflineSource {
    fn fetch(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<DeviceStatus, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("endpoint unreachable")))
    }
}

/// Replays a fixed script of samples and failures, then keeps returning the
/// last entry.
pub struct ScriptedSource {
    script: VecDeque<Result<DeviceStatus, String>>,
    last: Option<Result<DeviceStatus, String>>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Result<DeviceStatus, String>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: None,
        }
    }

    /// Convenience for an all-success script of `(count, weight)` pairs.
    pub fn samples(pairs: &[(i64, f64)]) -> Self {
        Self::new(pairs.iter().map(|&(count, weight)| {
            Ok(DeviceStatus {
                weight_kg: weight,
                gas_swap_count: count,
                last_update: 0,
            })
        }))
    }
}

impl StatusSource for ScriptedSource {
    fn fetch(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<DeviceStatus, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(next) = self.script.pop_front() {
            self.last = Some(next);
        }
        match &self.last {
            Some(Ok(status)) => Ok(*status),
            Some(Err(msg)) => Err(Box::new(std::io::Error::other(msg.clone()))),
            None => Err(Box::new(std::io::Error::other("empty script"))),
        }
    }
}
