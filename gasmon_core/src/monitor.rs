//! Ties the state, its store and the clock together and applies poll results.
//!
//! The store is shared with other processes (`settings set`, `clear-history`),
//! so every mutation reloads the stored document first and is followed by a
//! save through the injected `StateStore`. Connectivity is process-local.

use crate::error::MonitorError;
use crate::history::SwapRecord;
use crate::metrics::StatusCard;
use crate::poller::PollEvent;
use crate::readings::ReadingBuffer;
use crate::settings::{Settings, SettingsPatch};
use crate::state::GasState;
use crate::store::StateStore;
use crate::util::datetime_from_ms;
use gasmon_traits::{Clock, DeviceStatus};

/// Link health as shown on the technical panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connectivity {
    pub connected: bool,
    /// Round-trip time of the last successful fetch.
    pub latency_ms: u64,
    /// Last sample received; kept across misses so values stay on screen.
    pub last_status: Option<DeviceStatus>,
    pub last_error: Option<String>,
    /// Local time of the last tick, success or miss.
    pub last_poll_ms: Option<i64>,
}

/// What one applied tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A sample was applied and a swap detected.
    Swapped(SwapRecord),
    /// A sample was applied; no swap.
    Sampled,
    /// Nothing reached the engine.
    Missed,
}

/// Read-only view for presentation.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
    pub settings: &'a Settings,
    pub history: &'a crate::history::SwapHistory,
    pub readings: &'a ReadingBuffer,
    pub connectivity: &'a Connectivity,
    /// Current card, from the live sample or else the newest stored reading.
    pub card: Option<StatusCard>,
}

pub struct Monitor<St: StateStore, C: Clock> {
    state: GasState,
    store: St,
    clock: C,
    connectivity: Connectivity,
    readings_capacity: usize,
}

impl<St: StateStore, C: Clock> Monitor<St, C> {
    /// Load saved state, or start fresh with `initial` merged over the
    /// default settings. A fresh state is saved right away so its start
    /// instant survives a restart.
    pub fn open(
        store: St,
        clock: C,
        initial: &SettingsPatch,
        readings_capacity: usize,
    ) -> Result<Self, MonitorError> {
        let state = match store.load()? {
            Some(saved) => {
                tracing::debug!(
                    swaps = saved.history().len(),
                    readings = saved.readings().len(),
                    "loaded saved state"
                );
                saved.with_readings_capacity(readings_capacity)
            }
            None => {
                let settings = Settings::default().merged(initial)?;
                let fresh = GasState::new(datetime_from_ms(clock.now_ms()))
                    .with_settings(settings)
                    .with_readings_capacity(readings_capacity);
                store.save(&fresh)?;
                tracing::info!("initialized new state");
                fresh
            }
        };
        Ok(Self {
            state,
            store,
            clock,
            connectivity: Connectivity::default(),
            readings_capacity,
        })
    }

    pub fn state(&self) -> &GasState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Adopt whatever another writer left in the store. A failed reload
    /// keeps the in-memory copy.
    fn refresh(&mut self) {
        match self.store.load() {
            Ok(Some(saved)) => {
                let saved = saved.with_readings_capacity(self.readings_capacity);
                if saved != self.state {
                    tracing::debug!("stored state changed, reloading");
                    self.state = saved;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "failed to reload state"),
        }
    }

    /// Apply one poll result. Storage failures are logged, not returned, so
    /// monitoring carries on with in-memory state.
    pub fn apply(&mut self, event: PollEvent) -> TickOutcome {
        self.refresh();
        match event {
            PollEvent::Sample {
                status,
                latency_ms,
                received_at_ms,
            } => {
                let now = datetime_from_ms(received_at_ms);
                let swap = self
                    .state
                    .observe(status.gas_swap_count, status.weight_kg, now)
                    .cloned();
                self.state.add_reading(status.weight_kg, received_at_ms);

                self.connectivity.connected = true;
                self.connectivity.latency_ms = latency_ms;
                self.connectivity.last_status = Some(status);
                self.connectivity.last_error = None;
                self.connectivity.last_poll_ms = Some(received_at_ms);

                if let Err(e) = self.store.save(&self.state) {
                    tracing::error!(error = %e, "failed to persist state");
                }

                match swap {
                    Some(record) => {
                        tracing::info!(
                            count = status.gas_swap_count,
                            initial_weight = record.initial_weight,
                            final_weight = record.final_weight,
                            duration_days = record.duration_days,
                            "cylinder swap detected"
                        );
                        TickOutcome::Swapped(record)
                    }
                    None => {
                        tracing::debug!(
                            weight = status.weight_kg,
                            count = status.gas_swap_count,
                            latency_ms,
                            "sample applied"
                        );
                        TickOutcome::Sampled
                    }
                }
            }
            PollEvent::Miss { error, at_ms } => {
                tracing::warn!(%error, "status poll failed");
                self.connectivity.connected = false;
                self.connectivity.last_error = Some(error);
                self.connectivity.last_poll_ms = Some(at_ms);
                TickOutcome::Missed
            }
        }
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<Settings, MonitorError> {
        self.refresh();
        let updated = *self.state.update_settings(patch)?;
        self.store.save(&self.state)?;
        tracing::info!(
            tare_weight = updated.tare_weight,
            net_weight = updated.net_weight,
            update_interval_ms = updated.update_interval_ms,
            "settings updated"
        );
        Ok(updated)
    }

    pub fn clear_history(&mut self) -> Result<(), MonitorError> {
        self.refresh();
        self.state.clear_history();
        self.store.save(&self.state)?;
        tracing::info!("history cleared");
        Ok(())
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        let weight = self
            .connectivity
            .last_status
            .map(|s| s.weight_kg)
            .or_else(|| self.state.readings().latest().map(|r| r.weight));
        Dashboard {
            settings: &self.state.settings,
            history: self.state.history(),
            readings: self.state.readings(),
            connectivity: &self.connectivity,
            card: weight.map(|w| StatusCard::new(w, &self.state.settings)),
        }
    }
}
