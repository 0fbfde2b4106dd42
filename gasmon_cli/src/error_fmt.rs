//! Human-readable error descriptions and structured JSON error formatting.

use gasmon_core::MonitorError;
use gasmon_source::SourceError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(me) = err.downcast_ref::<MonitorError>() {
        return match me {
            MonitorError::Transport(msg) => format!(
                "What happened: The weight sensor API could not be reached ({msg}).\nLikely causes: No network, the API host is asleep or down, or source.url is wrong.\nHow to fix: Check connectivity and [source] url in the config, or raise source.timeout_ms."
            ),
            MonitorError::Settings(msg) => format!(
                "What happened: Settings were rejected ({msg}).\nLikely causes: A non-positive net weight, a negative tare weight, or an interval below 500 ms.\nHow to fix: Pass valid values to `gasmon settings set`; nothing was changed."
            ),
            MonitorError::Config(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing file, TOML syntax error, or out-of-range values.\nHow to fix: Edit the config file, then rerun. See etc/gasmon.toml for a sample."
            ),
            MonitorError::Storage(msg) => format!(
                "What happened: The state file could not be read or written ({msg}).\nLikely causes: Wrong path, missing permissions, or a corrupted file.\nHow to fix: Check [storage] state_file or --state; move a corrupted file aside to start fresh."
            ),
        };
    }

    if let Some(se) = err.downcast_ref::<SourceError>() {
        return format!(
            "What happened: {se}.\nLikely causes: The sensor API is unreachable or returned unexpected data.\nHow to fix: Re-run with --log-level=debug for details."
        );
    }

    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes per error kind; anything untyped maps to 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(me) = err.downcast_ref::<MonitorError>() {
        return match me {
            MonitorError::Config(_) => 3,
            MonitorError::Settings(_) => 4,
            MonitorError::Storage(_) => 5,
            MonitorError::Transport(_) => 6,
        };
    }
    if err.downcast_ref::<SourceError>().is_some() {
        return 6;
    }
    1
}

pub fn error_reason(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<MonitorError>() {
        Some(MonitorError::Config(_)) => "Config",
        Some(MonitorError::Settings(_)) => "Settings",
        Some(MonitorError::Storage(_)) => "Storage",
        Some(MonitorError::Transport(_)) => "Transport",
        None if err.downcast_ref::<SourceError>().is_some() => "Transport",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": error_reason(err),
        "code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_get_stable_codes() {
        let e: eyre::Report = MonitorError::Settings("net weight must be > 0".into()).into();
        assert_eq!(exit_code_for_error(&e), 4);
        assert!(humanize(&e).starts_with("What happened: Settings were rejected"));

        let e: eyre::Report = SourceError::Timeout.into();
        assert_eq!(exit_code_for_error(&e), 6);
        assert_eq!(error_reason(&e), "Transport");

        assert_eq!(exit_code_for_error(&eyre::eyre!("boom")), 1);
    }

    #[test]
    fn json_error_shape() {
        let e: eyre::Report = MonitorError::Storage("read x: denied".into()).into();
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&e)).unwrap();
        assert_eq!(v["reason"], "Storage");
        assert_eq!(v["code"], 5);
        assert!(v["message"].as_str().unwrap().contains("read x: denied"));
    }
}
