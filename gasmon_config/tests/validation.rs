use gasmon_config::{SourceKind, Theme, Unit, load_file, load_toml};
use rstest::rstest;
use std::io::Write;

#[test]
fn parses_full_document() {
    let toml = r#"
[source]
kind = "sim"
url = "http://localhost:8080/api"
timeout_ms = 750

[storage]
state_file = "/tmp/gas.json"

[settings]
tare_weight = 14.5
net_weight = 13.0
unit = "lb"
update_interval_ms = 1000
theme = "dark"

[readings]
capacity = 50

[logging]
level = "debug"
rotation = "hourly"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.source.kind, SourceKind::Sim);
    assert_eq!(cfg.source.timeout_ms, 750);
    assert_eq!(cfg.settings.tare_weight, Some(14.5));
    assert_eq!(cfg.settings.unit, Some(Unit::Lb));
    assert_eq!(cfg.settings.theme, Some(Theme::Dark));
    assert_eq!(cfg.readings.capacity, 50);
}

#[test]
fn accepts_request_timeout_alias() {
    let cfg = load_toml("[source]\nrequest_timeout_ms = 1200\n").expect("parse TOML");
    assert_eq!(cfg.source.timeout_ms, 1200);
}

#[rstest]
#[case("[settings]\nnet_weight = 0.0\n", "net_weight must be > 0")]
#[case("[settings]\nnet_weight = -2.0\n", "net_weight must be > 0")]
#[case("[settings]\ntare_weight = -1.0\n", "tare_weight must be")]
#[case("[settings]\nupdate_interval_ms = 499\n", "update_interval_ms must be >= 500")]
#[case("[readings]\ncapacity = 0\n", "capacity must be >= 1")]
#[case("[source]\ntimeout_ms = 0\n", "timeout_ms must be >= 1")]
#[case("[source]\nurl = \"  \"\n", "url must not be empty")]
#[case("[storage]\nstate_file = \"\"\n", "state_file must not be empty")]
#[case("[logging]\nrotation = \"weekly\"\n", "rotation must be one of")]
fn rejects_out_of_range_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should be rejected");
    assert!(
        format!("{err}").contains(needle),
        "error '{err}' does not mention '{needle}'"
    );
}

#[test]
fn empty_url_is_fine_for_simulator() {
    let cfg = load_toml("[source]\nkind = \"sim\"\nurl = \"\"\n").expect("parse TOML");
    cfg.validate().expect("sim source needs no url");
}

#[test]
fn rejects_unknown_unit() {
    assert!(load_toml("[settings]\nunit = \"stone\"\n").is_err());
}

#[test]
fn load_file_reads_from_disk() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "[readings]\ncapacity = 7").unwrap();
    let cfg = load_file(f.path()).expect("load config file");
    assert_eq!(cfg.readings.capacity, 7);
}

#[test]
fn load_file_reports_missing_path() {
    let err = load_file(std::path::Path::new("/definitely/not/here.toml"))
        .expect_err("missing file must fail");
    assert!(format!("{err}").contains("read config"));
}

#[test]
fn shipped_sample_config_is_valid() {
    let cfg = load_toml(include_str!("../../etc/gasmon.toml")).expect("sample parses");
    cfg.validate().expect("sample validates");
    assert_eq!(cfg.source.kind, SourceKind::Http);
    assert_eq!(cfg.settings.net_weight, Some(13.0));
}
