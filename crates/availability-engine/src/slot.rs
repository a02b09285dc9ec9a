//! Recurring weekly availability slots and their wire records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::time::TimeOfDay;
use crate::weekday::DayOfWeek;

/// A recurring weekly window in which a teacher can be booked.
///
/// Serializes to the profile API shape:
/// `{"dayOfWeek":"monday","startTime":"09:00","endTime":"10:00"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl AvailabilitySlot {
    /// Builds a slot without checking ordering or duration; see
    /// [`crate::validator::SlotValidator`] for that.
    pub fn new(day_of_week: DayOfWeek, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            day_of_week,
            start_time,
            end_time,
        }
    }

    /// Parse a slot from its three string parts (`"Monday"`, `"09:00"`, `"10:00"`).
    pub fn parse(day: &str, start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(day.parse()?, start.parse()?, end.parse()?))
    }

    pub fn duration_minutes(&self) -> i32 {
        self.end_time.minutes() - self.start_time.minutes()
    }

    /// Half-open overlap test on the same day. Back-to-back slots do not overlap.
    pub fn overlaps(&self, other: &AvailabilitySlot) -> bool {
        self.day_of_week == other.day_of_week
            && self.start_time < other.end_time
            && self.end_time > other.start_time
    }
}

impl fmt::Display for AvailabilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day_of_week, self.start_time, self.end_time)
    }
}

/// Loosely typed slot as it arrives from a stored profile.
///
/// Day names and times are kept as raw strings so one malformed entry does not
/// make a whole collection unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

impl SlotRecord {
    pub fn to_slot(&self) -> Result<AvailabilitySlot> {
        AvailabilitySlot::parse(&self.day_of_week, &self.start_time, &self.end_time)
    }
}

impl From<&AvailabilitySlot> for SlotRecord {
    fn from(slot: &AvailabilitySlot) -> Self {
        Self {
            day_of_week: slot.day_of_week.name().to_string(),
            start_time: slot.start_time.to_string(),
            end_time: slot.end_time.to_string(),
        }
    }
}

/// Convert records to slots, skipping (and logging) any that do not parse.
pub fn slots_from_records_lossy(records: &[SlotRecord]) -> Vec<AvailabilitySlot> {
    records
        .iter()
        .filter_map(|record| match record.to_slot() {
            Ok(slot) => Some(slot),
            Err(err) => {
                tracing::warn!(?record, %err, "skipping malformed availability record");
                None
            }
        })
        .collect()
}
