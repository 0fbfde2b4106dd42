use gasmon_core::metrics::{NORMAL_ABOVE_PCT, WARNING_ABOVE_PCT};
use gasmon_core::{StatusCard, StatusTier, net_gas_weight, percentage};
use gasmon_core::{Settings, SettingsPatch};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(15.0, 0.0)] // exactly tare
#[case(14.2, 0.0)] // noise below tare
#[case(0.0, 0.0)]
#[case(21.5, 50.0)]
#[case(28.0, 100.0)] // exactly full
#[case(31.0, 100.0)] // over-full clamps
fn percentage_cases(#[case] weight: f64, #[case] expected: f64) {
    assert_eq!(percentage(weight, 15.0, 13.0), expected);
}

#[rstest]
#[case(0.0)]
#[case(-13.0)]
fn non_positive_net_weight_gives_zero(#[case] net: f64) {
    let p = percentage(25.0, 15.0, net);
    assert_eq!(p, 0.0);
    assert!(p.is_finite());
}

#[test]
fn non_finite_inputs_give_zero() {
    assert_eq!(percentage(f64::NAN, 15.0, 13.0), 0.0);
    assert_eq!(percentage(f64::INFINITY, 15.0, 13.0), 0.0);
    assert_eq!(percentage(20.0, 15.0, f64::NAN), 0.0);
}

#[rstest]
#[case(100.0, StatusTier::Normal)]
#[case(40.01, StatusTier::Normal)]
#[case(40.0, StatusTier::Warning)]
#[case(20.01, StatusTier::Warning)]
#[case(20.0, StatusTier::Critical)]
#[case(0.0, StatusTier::Critical)]
fn tier_thresholds(#[case] pct: f64, #[case] tier: StatusTier) {
    assert_eq!(StatusTier::from_percentage(pct), tier);
}

#[test]
fn thresholds_are_fixed() {
    assert_eq!(NORMAL_ABOVE_PCT, 40.0);
    assert_eq!(WARNING_ABOVE_PCT, 20.0);
}

#[test]
fn tier_color_and_label_are_distinct() {
    let tiers = [StatusTier::Normal, StatusTier::Warning, StatusTier::Critical];
    for (i, a) in tiers.iter().enumerate() {
        for b in &tiers[i + 1..] {
            assert_ne!(a.color(), b.color());
            assert_ne!(a.label(), b.label());
        }
    }
    assert_eq!(StatusTier::Critical.color(), "#ef4444");
    assert_eq!(StatusTier::Critical.label(), "Swap recommended");
}

#[test]
fn net_gas_weight_never_negative() {
    assert_eq!(net_gas_weight(10.0, 15.0), 0.0);
    assert_eq!(net_gas_weight(20.0, 15.0), 5.0);
}

#[test]
fn status_card_for_low_cylinder() {
    let settings = Settings::default()
        .merged(&SettingsPatch {
            tare_weight: Some(15.0),
            net_weight: Some(13.0),
            ..SettingsPatch::default()
        })
        .unwrap();
    let card = StatusCard::new(17.6, &settings);
    assert!((card.percentage - 20.0).abs() < 1e-9);
    assert!((card.gas_weight - 2.6).abs() < 1e-9);
    assert_eq!(card.total_weight, 17.6);
}

proptest! {
    #[test]
    fn below_tare_is_empty(tare in 0.0f64..50.0, net in 0.1f64..50.0, below in 0.0f64..50.0) {
        prop_assert_eq!(percentage(tare - below, tare, net), 0.0);
    }

    #[test]
    fn at_or_above_full_is_hundred(tare in 0.0f64..50.0, net in 0.1f64..50.0, over in 0.0f64..50.0) {
        prop_assert_eq!(percentage(tare + net + over, tare, net), 100.0);
    }

    #[test]
    fn monotonic_in_weight(
        tare in 0.0f64..50.0,
        net in 0.1f64..50.0,
        a in -10.0f64..120.0,
        b in -10.0f64..120.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(percentage(lo, tare, net) <= percentage(hi, tare, net));
    }

    #[test]
    fn always_in_range(w in proptest::num::f64::ANY, tare in -50.0f64..50.0, net in -5.0f64..50.0) {
        let p = percentage(w, tare, net);
        prop_assert!((0.0..=100.0).contains(&p));
    }
}
