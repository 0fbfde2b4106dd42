#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary TOML must either fail to parse or validate without panicking.
    if let Ok(cfg) = gasmon_config::load_toml(data) {
        let _ = cfg.validate();
        let _ = cfg.settings.validate();
    }
});
