//! Tests for slot durations.

use availability_engine::duration::{self, DurationError, DurationStyle, SlotDuration};
use availability_engine::{format_duration, minutes_between, AvailabilityError, TimeOfDay};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

#[test]
fn whole_hours() {
    assert_eq!(format_duration(t("09:00"), t("17:00")).unwrap(), "8 hrs");
    assert_eq!(format_duration(t("09:00"), t("10:00")).unwrap(), "1 hr");
}

#[test]
fn single_minute() {
    assert_eq!(format_duration(t("09:00"), t("09:01")).unwrap(), "1 min");
}

#[test]
fn hours_and_minutes() {
    assert_eq!(format_duration(t("09:00"), t("10:30")).unwrap(), "1 hr 30 mins");
    assert_eq!(format_duration(t("08:15"), t("10:16")).unwrap(), "2 hrs 1 min");
}

#[test]
fn negative_duration_is_invalid() {
    let err = format_duration(t("09:00"), t("08:00")).unwrap_err();
    assert_eq!(err, DurationError::NegativeDuration { minutes: -60 });
    assert_eq!(err.to_string(), "Invalid");
}

#[test]
fn raw_minutes() {
    assert_eq!(minutes_between(t("09:00"), t("09:30")), 30);
    assert_eq!(minutes_between(t("09:00"), t("09:00")), 0);
    assert_eq!(minutes_between(t("10:00"), t("09:00")), -60);
}

#[test]
fn format_in_minutes_style() {
    assert_eq!(
        duration::format("09:00", "09:30", DurationStyle::Minutes),
        Ok(SlotDuration::Minutes(30))
    );
    // Raw counts are not validated.
    assert_eq!(
        duration::format("09:30", "09:00", DurationStyle::Minutes),
        Ok(SlotDuration::Minutes(-30))
    );
}

#[test]
fn format_in_human_style() {
    assert_eq!(
        duration::format("09:00", "17:00", DurationStyle::Human),
        Ok(SlotDuration::Human("8 hrs".to_string()))
    );
    assert_eq!(
        duration::format("09:00", "08:00", DurationStyle::Human),
        Err(DurationError::NegativeDuration { minutes: -60 })
    );
}

#[test]
fn format_rejects_unparseable_times() {
    assert_eq!(
        duration::format("9am", "10:00", DurationStyle::Human),
        Err(DurationError::Time(AvailabilityError::InvalidTime(
            "9am".to_string()
        )))
    );
}

#[test]
fn slot_duration_serializes_untagged() {
    assert_eq!(serde_json::to_string(&SlotDuration::Minutes(45)).unwrap(), "45");
    assert_eq!(
        serde_json::to_string(&SlotDuration::Human("45 mins".into())).unwrap(),
        r#""45 mins""#
    );
}
