//! Slot duration in minutes or as display text ("1 hr 30 mins").

use serde::Serialize;
use thiserror::Error;

use crate::error::AvailabilityError;
use crate::time::TimeOfDay;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// End time before start time. Displays as `Invalid`, the text the booking
    /// views show in place of a duration.
    #[error("Invalid")]
    NegativeDuration { minutes: i32 },

    #[error(transparent)]
    Time(#[from] AvailabilityError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// Raw minute count, unchecked.
    Minutes,
    /// Pluralized text such as `"8 hrs"` or `"1 hr 5 mins"`.
    #[default]
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SlotDuration {
    Minutes(i32),
    Human(String),
}

/// `end - start` in minutes. Zero and negative values are returned unchanged.
pub fn minutes_between(start: TimeOfDay, end: TimeOfDay) -> i32 {
    end.minutes() - start.minutes()
}

/// Human-readable duration between two times.
pub fn format_duration(
    start: TimeOfDay,
    end: TimeOfDay,
) -> Result<String, DurationError> {
    let minutes = minutes_between(start, end);
    if minutes < 0 {
        return Err(DurationError::NegativeDuration { minutes });
    }
    Ok(humanize_minutes(minutes.unsigned_abs()))
}

/// Format a non-negative minute count. Zero renders as `"0 mins"`.
pub fn humanize_minutes(total: u32) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    let hr = |h: u32| format!("{} hr{}", h, plural(h));
    let min = |m: u32| format!("{} min{}", m, plural(m));

    match (hours, minutes) {
        (0, m) => min(m),
        (h, 0) => hr(h),
        (h, m) => format!("{} {}", hr(h), min(m)),
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Duration between two `"HH:mm"` strings in the requested style.
///
/// `DurationStyle::Minutes` never fails on ordering: callers asking for the raw
/// count get negative values back and validate them themselves.
pub fn format(start: &str, end: &str, style: DurationStyle) -> Result<SlotDuration, DurationError> {
    let start: TimeOfDay = start.parse()?;
    let end: TimeOfDay = end.parse()?;
    match style {
        DurationStyle::Minutes => Ok(SlotDuration::Minutes(minutes_between(start, end))),
        DurationStyle::Human => format_duration(start, end).map(SlotDuration::Human),
    }
}
