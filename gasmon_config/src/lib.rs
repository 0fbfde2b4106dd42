#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the gas cylinder monitor.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - `[settings]` only seeds the user-tunable settings on first run; after
//!   that the persisted state owns them.
use serde::{Deserialize, Serialize};

/// Smallest polling interval accepted anywhere in the system.
pub const MIN_UPDATE_INTERVAL_MS: u64 = 500;

/// Weight unit used for display.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    Lb,
}

impl Unit {
    pub const LB_PER_KG: f64 = 2.204_622_62;

    /// Convert a weight reported in kilograms into this unit.
    #[inline]
    pub fn convert_from_kg(self, kg: f64) -> f64 {
        match self {
            Unit::Kg => kg,
            Unit::Lb => kg * Self::LB_PER_KG,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Lb => "lb",
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(Unit::Kg),
            "lb" => Ok(Unit::Lb),
            other => Err(format!("unknown unit '{other}' (expected kg or lb)")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Http,
    /// Deterministic simulated cylinder; no network access.
    Sim,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SourceCfg {
    pub kind: SourceKind,
    /// Base API url; the status endpoint is `{url}/status`.
    pub url: String,
    /// Per-request timeout (ms). Also accepts alias "request_timeout_ms".
    #[serde(alias = "request_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SourceCfg {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            url: "https://monitoramento-de-peso-api.onrender.com/api".to_string(),
            timeout_ms: 5_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageCfg {
    /// Path of the persisted state document (JSON).
    pub state_file: String,
}

impl Default for StorageCfg {
    fn default() -> Self {
        Self {
            state_file: "gasmon_state.json".to_string(),
        }
    }
}

/// First-run values for the user-tunable settings. Every field is optional;
/// absent fields fall back to the built-in defaults.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SettingsCfg {
    pub tare_weight: Option<f64>,
    pub net_weight: Option<f64>,
    pub unit: Option<Unit>,
    pub update_interval_ms: Option<u64>,
    pub theme: Option<Theme>,
}

impl SettingsCfg {
    pub fn validate(&self) -> eyre::Result<()> {
        if let Some(tare) = self.tare_weight
            && !(tare.is_finite() && tare >= 0.0)
        {
            eyre::bail!("settings.tare_weight must be a finite value >= 0");
        }
        if let Some(net) = self.net_weight
            && !(net.is_finite() && net > 0.0)
        {
            eyre::bail!("settings.net_weight must be > 0");
        }
        if let Some(ms) = self.update_interval_ms
            && ms < MIN_UPDATE_INTERVAL_MS
        {
            eyre::bail!("settings.update_interval_ms must be >= {MIN_UPDATE_INTERVAL_MS}");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReadingsCfg {
    /// Number of weight readings kept for charting.
    pub capacity: usize,
}

impl Default for ReadingsCfg {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceCfg,
    #[serde(default)]
    pub storage: StorageCfg,
    #[serde(default)]
    pub settings: SettingsCfg,
    #[serde(default)]
    pub readings: ReadingsCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub fn load_file(path: &std::path::Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("invalid configuration in {:?}: {}", path, e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Source
        if self.source.kind == SourceKind::Http && self.source.url.trim().is_empty() {
            eyre::bail!("source.url must not be empty");
        }
        if self.source.timeout_ms == 0 {
            eyre::bail!("source.timeout_ms must be >= 1");
        }

        // Storage
        if self.storage.state_file.trim().is_empty() {
            eyre::bail!("storage.state_file must not be empty");
        }

        self.settings.validate()?;

        // Readings
        if self.readings.capacity == 0 {
            eyre::bail!("readings.capacity must be >= 1");
        }

        // Logging
        if let Some(rotation) = self.logging.rotation.as_deref()
            && !matches!(rotation, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never, daily, hourly");
        }

        Ok(())
    }
}
