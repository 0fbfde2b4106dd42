use gasmon_traits::{DeviceStatus, StatusSource};

/// Deterministic stand-in for the remote sensor.
///
/// The cylinder starts full and loses `drain_per_poll` kg per fetch. When
/// the gross weight falls to `swap_below`, the next fetch reports a fresh
/// full cylinder and an incremented swap counter. Every `offline_every`-th
/// fetch fails, if configured.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    full_weight: f64,
    swap_below: f64,
    drain_per_poll: f64,
    weight: f64,
    swap_count: i64,
    polls: u64,
    offline_every: Option<u64>,
    epoch_s: i64,
    seconds_per_poll: i64,
}

impl SimulatedSource {
    /// Cylinder of `tare` + `net` kg, swapped when only ~10% of the gas is left.
    pub fn new(tare: f64, net: f64) -> Self {
        let full = tare + net;
        Self {
            full_weight: full,
            swap_below: tare + net * 0.1,
            drain_per_poll: net / 200.0,
            weight: full,
            swap_count: 0,
            polls: 0,
            offline_every: None,
            epoch_s: 1_700_000_000,
            seconds_per_poll: 2,
        }
    }

    pub fn with_drain_per_poll(mut self, kg: f64) -> Self {
        self.drain_per_poll = kg.max(0.0);
        self
    }

    pub fn with_swap_count(mut self, count: i64) -> Self {
        self.swap_count = count.max(0);
        self
    }

    /// Fail every `n`-th fetch (`n >= 2`; smaller values disable failures).
    pub fn with_offline_every(mut self, n: u64) -> Self {
        self.offline_every = (n >= 2).then_some(n);
        self
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    fn step(&mut self) -> DeviceStatus {
        if self.weight <= self.swap_below {
            self.swap_count += 1;
            self.weight = self.full_weight;
        } else if self.polls > 1 {
            self.weight = (self.weight - self.drain_per_poll).max(0.0);
        }
        DeviceStatus {
            weight_kg: self.weight,
            gas_swap_count: self.swap_count,
            last_update: self.epoch_s + self.polls as i64 * self.seconds_per_poll,
        }
    }
}

impl StatusSource for SimulatedSource {
    fn fetch(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<DeviceStatus, Box<dyn std::error::Error + Send + Sync>> {
        self.polls += 1;
        if let Some(n) = self.offline_every
            && self.polls % n == 0
        {
            return Err(Box::new(crate::error::SourceError::Timeout));
        }
        let status = self.step();
        tracing::trace!(
            weight_kg = status.weight_kg,
            gas_swap_count = status.gas_swap_count,
            "simulated status"
        );
        Ok(status)
    }
}
