use chrono::NaiveDate;
use moodlog_core::{MoodLabel, MoodRecord};

#[test]
fn record_serializes_with_iso_date_and_label_name() {
    let record = MoodRecord::new(
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
        MoodLabel::Stressed,
    );

    let json = serde_json::to_value(record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "date": "2025-03-09", "mood": "Stressed" })
    );

    let decoded: MoodRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn unknown_label_name_is_rejected() {
    let value = serde_json::json!({ "date": "2025-03-09", "mood": "Ecstatic" });
    assert!(serde_json::from_value::<MoodRecord>(value).is_err());
}

#[test]
fn labels_parse_with_or_without_glyph() {
    assert_eq!(MoodLabel::parse_display("😴 Tired"), Some(MoodLabel::Tired));
    assert_eq!(MoodLabel::parse_display("  angry "), Some(MoodLabel::Angry));
    assert_eq!(MoodLabel::parse_display("very angry today"), None);
    assert_eq!(MoodLabel::parse_display(""), None);
}
