use ministry_types::Timestamp;
use proptest::prelude::*;

#[test]
fn now_is_positive() {
    assert!(Timestamp::now().as_millis() > 0);
}

#[test]
fn from_millis_roundtrip() {
    assert_eq!(Timestamp::from_millis(42).as_millis(), 42);
}

#[test]
fn ordering_follows_millis() {
    let a = Timestamp::from_millis(100);
    let b = Timestamp::from_millis(200);
    assert!(a < b);
    assert_eq!(a.max(b), b);
}

#[test]
fn serializes_as_integer() {
    let ts = Timestamp::from_millis(1_700_000_000_000);
    assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000000");
}

#[test]
fn display_is_rfc3339() {
    let ts = Timestamp::from_millis(0);
    assert_eq!(ts.to_string(), "1970-01-01T00:00:00+00:00");
}

#[test]
fn out_of_range_is_invalid() {
    assert!(Timestamp::from_millis(i64::MAX).to_datetime().is_err());
}

proptest! {
    #[test]
    fn datetime_conversion_preserves_millis(millis in 0i64..4_102_444_800_000) {
        let ts = Timestamp::from_millis(millis);
        let dt = ts.to_datetime().unwrap();
        prop_assert_eq!(Timestamp::from(dt), ts);
    }
}
