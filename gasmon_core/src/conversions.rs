//! `From` implementations bridging `gasmon_config` types to `gasmon_core` types.

use crate::settings::SettingsPatch;

impl From<&gasmon_config::SettingsCfg> for SettingsPatch {
    fn from(c: &gasmon_config::SettingsCfg) -> Self {
        Self {
            tare_weight: c.tare_weight,
            net_weight: c.net_weight,
            unit: c.unit,
            update_interval_ms: c.update_interval_ms,
            theme: c.theme,
        }
    }
}
