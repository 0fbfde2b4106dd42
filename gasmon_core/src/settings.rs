//! User-tunable calibration and display settings.

use crate::error::MonitorError;
use gasmon_config::{MIN_UPDATE_INTERVAL_MS, Theme, Unit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Weight of the empty cylinder.
    pub tare_weight: f64,
    /// Weight of the gas in a full cylinder. Always > 0.
    pub net_weight: f64,
    pub unit: Unit,
    /// Polling cadence; never below `MIN_UPDATE_INTERVAL_MS`.
    pub update_interval_ms: u64,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tare_weight: 15.0,
            net_weight: 13.0,
            unit: Unit::Kg,
            update_interval_ms: 2_000,
            theme: Theme::Light,
        }
    }
}

/// Partial update; `None` leaves the current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsPatch {
    pub tare_weight: Option<f64>,
    pub net_weight: Option<f64>,
    pub unit: Option<Unit>,
    pub update_interval_ms: Option<u64>,
    pub theme: Option<Theme>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !(self.tare_weight.is_finite() && self.tare_weight >= 0.0) {
            return Err(MonitorError::Settings(
                "tare weight must be a finite value >= 0".into(),
            ));
        }
        if !(self.net_weight.is_finite() && self.net_weight > 0.0) {
            return Err(MonitorError::Settings("net weight must be > 0".into()));
        }
        if self.update_interval_ms < MIN_UPDATE_INTERVAL_MS {
            return Err(MonitorError::Settings(format!(
                "update interval must be >= {MIN_UPDATE_INTERVAL_MS} ms"
            )));
        }
        Ok(())
    }

    /// Merge `patch` over `self`. The result is validated as a whole, so a
    /// rejected patch never leaves a half-applied value behind.
    pub fn merged(&self, patch: &SettingsPatch) -> Result<Settings, MonitorError> {
        let next = Settings {
            tare_weight: patch.tare_weight.unwrap_or(self.tare_weight),
            net_weight: patch.net_weight.unwrap_or(self.net_weight),
            unit: patch.unit.unwrap_or(self.unit),
            update_interval_ms: patch.update_interval_ms.unwrap_or(self.update_interval_ms),
            theme: patch.theme.unwrap_or(self.theme),
        };
        next.validate()?;
        Ok(next)
    }
}
