//! JSON payload of `GET {url}/status`.

use crate::error::{Result, SourceError};
use gasmon_traits::DeviceStatus;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireStatus {
    weight_kg: f64,
    gas_swap_count: i64,
    last_update: i64,
}

/// Parse and sanity-check one status body. Missing fields, a non-finite
/// weight or a negative swap count are rejected.
pub fn decode_status(body: &str) -> Result<DeviceStatus> {
    let wire: WireStatus =
        serde_json::from_str(body).map_err(|e| SourceError::Decode(e.to_string()))?;
    if !wire.weight_kg.is_finite() {
        return Err(SourceError::Malformed(format!(
            "weightKg is not finite: {}",
            wire.weight_kg
        )));
    }
    if wire.gas_swap_count < 0 {
        return Err(SourceError::Malformed(format!(
            "gasSwapCount is negative: {}",
            wire.gas_swap_count
        )));
    }
    Ok(DeviceStatus {
        weight_kg: wire.weight_kg,
        gas_swap_count: wire.gas_swap_count,
        last_update: wire.last_update,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_fields_are_ignored() {
        let s = decode_status(
            r#"{"weightKg":21.5,"gasSwapCount":4,"lastUpdate":1700000000,"deviceId":"esp32"}"#,
        )
        .unwrap();
        assert_eq!(s.gas_swap_count, 4);
        assert_eq!(s.weight_kg, 21.5);
    }
}
