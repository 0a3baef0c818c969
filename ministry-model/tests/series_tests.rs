use ministry_model::{ModelError, NewSeries, SermonSeries, DEFAULT_SERIES_COLOR};
use ministry_types::{Timestamp, UserId};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn new_series_is_active_with_default_color() {
    let user = UserId::new();
    let series =
        SermonSeries::new(user, NewSeries::new("Advent"), Timestamp::from_millis(10)).unwrap();

    assert_eq!(series.user_id, user);
    assert_eq!(series.name, "Advent");
    assert_eq!(series.color, DEFAULT_SERIES_COLOR);
    assert!(series.active);
    assert_eq!(series.created_at, Timestamp::from_millis(10));
    assert_eq!(series.archived_at, None);
}

#[test]
fn explicit_color_is_kept() {
    let series = SermonSeries::new(
        UserId::new(),
        NewSeries::new("Romans").with_color("blue"),
        Timestamp::now(),
    )
    .unwrap();
    assert_eq!(series.color, "blue");
}

#[test]
fn blank_color_falls_back_to_default() {
    let series = SermonSeries::new(
        UserId::new(),
        NewSeries::new("Romans").with_color("  "),
        Timestamp::now(),
    )
    .unwrap();
    assert_eq!(series.color, DEFAULT_SERIES_COLOR);
}

#[test]
fn blank_name_is_rejected() {
    let err =
        SermonSeries::new(UserId::new(), NewSeries::new("   "), Timestamp::now()).unwrap_err();
    assert_eq!(err, ModelError::MissingField("name"));
}

#[test]
fn archive_then_unarchive() {
    let input = NewSeries::new("Psalms");
    let mut series =
        SermonSeries::new(UserId::new(), input, Timestamp::from_millis(1)).unwrap();

    series.set_active(false, Timestamp::from_millis(5));
    assert!(!series.active);
    assert_eq!(series.archived_at, Some(Timestamp::from_millis(5)));
    assert_eq!(series.updated_at, Some(Timestamp::from_millis(5)));

    series.set_active(true, Timestamp::from_millis(9));
    assert!(series.active);
    assert_eq!(series.archived_at, None);
    assert_eq!(series.updated_at, Some(Timestamp::from_millis(9)));
}

#[test]
fn serializes_with_camel_case_keys() {
    let input = NewSeries::new("Acts");
    let series =
        SermonSeries::new(UserId::new(), input, Timestamp::from_millis(7)).unwrap();
    let value = serde_json::to_value(&series).unwrap();

    assert_eq!(value["createdAt"], json!(7));
    assert_eq!(value["archivedAt"], json!(null));
    assert!(value.get("userId").is_some());
    assert!(value.get("updatedAt").is_none());
}
