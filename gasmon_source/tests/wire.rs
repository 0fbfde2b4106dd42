use gasmon_source::{SourceError, decode_status};
use rstest::rstest;

#[test]
fn decodes_camel_case_payload() {
    let s = decode_status(r#"{"weightKg":27.9,"gasSwapCount":12,"lastUpdate":1718000000}"#)
        .unwrap();
    assert_eq!(s.weight_kg, 27.9);
    assert_eq!(s.gas_swap_count, 12);
    assert_eq!(s.last_update, 1_718_000_000);
}

#[test]
fn integer_weight_is_accepted() {
    let s = decode_status(r#"{"weightKg":20,"gasSwapCount":0,"lastUpdate":0}"#).unwrap();
    assert_eq!(s.weight_kg, 20.0);
}

#[rstest]
#[case::missing_weight(r#"{"gasSwapCount":1,"lastUpdate":0}"#)]
#[case::missing_count(r#"{"weightKg":1.0,"lastUpdate":0}"#)]
#[case::null_weight(r#"{"weightKg":null,"gasSwapCount":1,"lastUpdate":0}"#)]
#[case::string_count(r#"{"weightKg":1.0,"gasSwapCount":"3","lastUpdate":0}"#)]
#[case::not_json("<html>502 Bad Gateway</html>")]
#[case::empty("")]
fn undecodable_payloads(#[case] body: &str) {
    let err = decode_status(body).unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)), "got {err:?}");
}

#[test]
fn negative_count_is_malformed() {
    let err = decode_status(r#"{"weightKg":20.0,"gasSwapCount":-1,"lastUpdate":0}"#)
        .unwrap_err();
    assert!(matches!(err, SourceError::Malformed(_)));
    assert!(err.to_string().contains("gasSwapCount"));
}
