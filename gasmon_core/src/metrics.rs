//! Fill percentage, status tier and the status-card view model.
//!
//! Everything here is pure. Weights are in the sensor's unit (kg); `Unit`
//! only affects how values are presented.

use crate::settings::Settings;
use gasmon_config::Unit;
use serde::Serialize;

/// Above this percentage the cylinder is in normal use.
pub const NORMAL_ABOVE_PCT: f64 = 40.0;
/// Above this percentage (and up to `NORMAL_ABOVE_PCT`) the cylinder needs attention.
pub const WARNING_ABOVE_PCT: f64 = 20.0;

const _: () = assert!(WARNING_ABOVE_PCT < NORMAL_ABOVE_PCT);

/// Fill percentage in `[0, 100]`.
///
/// Readings at or below tare (including sensor noise) give 0. Over-full or
/// miscalibrated readings clamp to 100. A non-positive `net_weight` or any
/// non-finite input gives 0 instead of `inf`/`NaN`.
pub fn percentage(current_weight: f64, tare_weight: f64, net_weight: f64) -> f64 {
    if !(current_weight.is_finite() && tare_weight.is_finite() && net_weight.is_finite()) {
        return 0.0;
    }
    if net_weight <= 0.0 || current_weight <= tare_weight {
        return 0.0;
    }
    if current_weight >= tare_weight + net_weight {
        return 100.0;
    }
    let gas = current_weight - tare_weight;
    (gas / net_weight * 100.0).clamp(0.0, 100.0)
}

/// Remaining gas, never negative.
#[inline]
pub fn net_gas_weight(current_weight: f64, tare_weight: f64) -> f64 {
    (current_weight - tare_weight).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    Normal,
    Warning,
    Critical,
}

impl StatusTier {
    pub fn from_percentage(pct: f64) -> Self {
        if pct > NORMAL_ABOVE_PCT {
            StatusTier::Normal
        } else if pct > WARNING_ABOVE_PCT {
            StatusTier::Warning
        } else {
            StatusTier::Critical
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StatusTier::Normal => "#22c55e",
            StatusTier::Warning => "#eab308",
            StatusTier::Critical => "#ef4444",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusTier::Normal => "Normal use",
            StatusTier::Warning => "Attention",
            StatusTier::Critical => "Swap recommended",
        }
    }
}

/// Everything the status card shows for one weight reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusCard {
    /// Gross weight, converted to `unit`.
    pub total_weight: f64,
    /// Gas remaining, converted to `unit`.
    pub gas_weight: f64,
    pub percentage: f64,
    pub tier: StatusTier,
    pub label: &'static str,
    pub color: &'static str,
    pub unit: Unit,
}

impl StatusCard {
    pub fn new(current_weight: f64, settings: &Settings) -> Self {
        let pct = percentage(current_weight, settings.tare_weight, settings.net_weight);
        let tier = StatusTier::from_percentage(pct);
        let unit = settings.unit;
        Self {
            total_weight: unit.convert_from_kg(current_weight),
            gas_weight: unit.convert_from_kg(net_gas_weight(current_weight, settings.tare_weight)),
            percentage: pct,
            tier,
            label: tier.label(),
            color: tier.color(),
            unit,
        }
    }
}
