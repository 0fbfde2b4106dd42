use gasmon_core::{Reading, ReadingBuffer};
use rstest::rstest;

#[rstest]
#[case(0)]
#[case(1)]
#[case(99)]
#[case(100)]
#[case(101)]
#[case(1_000)]
fn never_exceeds_default_capacity(#[case] appends: usize) {
    let mut buf = ReadingBuffer::default();
    for i in 0..appends {
        buf.append(i as f64, i as i64);
    }
    assert_eq!(buf.len(), appends.min(100));
    assert!(buf.len() <= buf.capacity());
}

#[test]
fn evicts_oldest_first() {
    let mut buf = ReadingBuffer::default();
    for i in 0..250 {
        buf.append(i as f64 * 0.5, 1_000 + i as i64);
    }
    let items = buf.to_vec();
    assert_eq!(items.len(), 100);
    // The 150 oldest are gone; order is oldest to newest.
    assert_eq!(items.first(), Some(&Reading { timestamp: 1_150, weight: 75.0 }));
    assert_eq!(items.last(), Some(&Reading { timestamp: 1_249, weight: 124.5 }));
    assert!(items.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn keeps_duplicates_in_receipt_order() {
    let mut buf = ReadingBuffer::with_capacity(3);
    buf.append(20.0, 5);
    buf.append(20.0, 5);
    buf.append(19.0, 4);
    let weights: Vec<f64> = buf.iter().map(|r| r.weight).collect();
    assert_eq!(weights, vec![20.0, 20.0, 19.0]);
}

#[test]
fn shrinking_capacity_drops_oldest() {
    let mut buf = ReadingBuffer::with_capacity(10);
    for i in 0..10 {
        buf.append(i as f64, i);
    }
    buf.set_capacity(4);
    let ts: Vec<i64> = buf.iter().map(|r| r.timestamp).collect();
    assert_eq!(ts, vec![6, 7, 8, 9]);
}

#[test]
fn zero_capacity_behaves_as_one() {
    let mut buf = ReadingBuffer::with_capacity(0);
    buf.append(1.0, 1);
    buf.append(2.0, 2);
    assert_eq!(buf.len(), 1);
    assert_eq!(buf.latest().map(|r| r.weight), Some(2.0));
}

#[test]
fn serializes_as_plain_array() {
    let mut buf = ReadingBuffer::default();
    buf.append(21.0, 10);
    let json = serde_json::to_string(&buf).unwrap();
    assert_eq!(json, r#"[{"timestamp":10,"weight":21.0}]"#);
    let back: ReadingBuffer = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_vec(), buf.to_vec());
}
