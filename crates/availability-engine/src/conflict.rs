//! Audit a slot collection for same-day overlaps.
//!
//! Collections built through [`crate::schedule::WeeklySchedule::add`] never
//! overlap, but profiles saved by another client (last write wins) can.
//! Adjacent slots, where one ends exactly when another starts, are NOT overlaps.

use serde::Serialize;

use crate::slot::AvailabilitySlot;

/// Two slots from the same collection that share some time on the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotOverlap {
    pub first: AvailabilitySlot,
    pub second: AvailabilitySlot,
    pub overlap_minutes: i32,
}

/// Find every overlapping pair in `slots`, in collection order.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_overlaps(slots: &[AvailabilitySlot]) -> Vec<SlotOverlap> {
    let mut overlaps = Vec::new();

    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            if a.overlaps(b) {
                let start = a.start_time.max(b.start_time);
                let end = a.end_time.min(b.end_time);
                overlaps.push(SlotOverlap {
                    first: *a,
                    second: *b,
                    overlap_minutes: end.minutes() - start.minutes(),
                });
            }
        }
    }

    overlaps
}
