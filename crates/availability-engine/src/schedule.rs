//! A teacher's weekly availability: the slot collection the profile owns.
//!
//! The flat collection keeps insertion order, newest first, because that is the
//! order the profile-update call serializes. Per-day lookups go through
//! [`DaySlots`], a fixed seven-entry index keyed by [`DayOfWeek`].

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::slot::{slots_from_records_lossy, AvailabilitySlot, SlotRecord};
use crate::time::TimeOfDay;
use crate::validator::{Rejection, SlotValidator};
use crate::weekday::DayOfWeek;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    slots: Vec<AvailabilitySlot>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing collection as-is (no validation).
    ///
    /// Use [`crate::conflict::find_overlaps`] to audit collections that did not
    /// come through [`WeeklySchedule::add`].
    pub fn from_slots(slots: Vec<AvailabilitySlot>) -> Self {
        Self { slots }
    }

    /// Build from stored records, dropping the ones that do not parse.
    pub fn from_records_lossy(records: &[SlotRecord]) -> Self {
        Self::from_slots(slots_from_records_lossy(records))
    }

    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<AvailabilitySlot> {
        self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Validate `candidate` and, if accepted, put it at the front of the collection.
    ///
    /// No merging of adjacent slots happens.
    pub fn add(
        &mut self,
        candidate: AvailabilitySlot,
        validator: &SlotValidator,
    ) -> Result<(), Rejection> {
        if let Err(rejection) = validator.validate(&candidate, &self.slots) {
            tracing::debug!(slot = %candidate, %rejection, "availability slot rejected");
            return Err(rejection);
        }
        tracing::debug!(slot = %candidate, "availability slot added");
        self.slots.insert(0, candidate);
        Ok(())
    }

    /// Remove the first slot equal to `slot`. Returns whether one was removed.
    pub fn remove(&mut self, slot: &AvailabilitySlot) -> bool {
        match self.slots.iter().position(|s| s == slot) {
            Some(index) => {
                self.slots.remove(index);
                tracing::debug!(%slot, "availability slot removed");
                true
            }
            None => false,
        }
    }

    /// Remove by position in the flat collection.
    pub fn remove_at(&mut self, index: usize) -> Option<AvailabilitySlot> {
        (index < self.slots.len()).then(|| self.slots.remove(index))
    }

    pub fn by_day(&self) -> DaySlots {
        DaySlots::from_slots(&self.slots)
    }

    /// Total bookable minutes per week. Slots with inverted times count as zero.
    pub fn total_minutes(&self) -> i64 {
        self.slots
            .iter()
            .map(|s| i64::from(s.duration_minutes().max(0)))
            .sum()
    }

    /// Unbooked stretches of `day` within `[window_start, window_end)`.
    ///
    /// Slots are clipped to the window and merged before the gaps between them
    /// are computed. A day with no slots yields one gap covering the window.
    pub fn free_gaps(
        &self,
        day: DayOfWeek,
        window_start: TimeOfDay,
        window_end: TimeOfDay,
    ) -> Vec<Gap> {
        if window_start >= window_end {
            return Vec::new();
        }

        let mut intervals: Vec<(TimeOfDay, TimeOfDay)> = self
            .slots
            .iter()
            .filter(|s| s.day_of_week == day)
            .filter(|s| s.start_time < window_end && s.end_time > window_start)
            .map(|s| (s.start_time.max(window_start), s.end_time.min(window_end)))
            .collect();
        intervals.sort();

        let mut gaps = Vec::new();
        let mut cursor = window_start;
        for (start, end) in intervals {
            if cursor < start {
                gaps.push(Gap::new(day, cursor, start));
            }
            cursor = cursor.max(end);
        }
        if cursor < window_end {
            gaps.push(Gap::new(day, cursor, window_end));
        }

        gaps
    }
}

impl From<Vec<AvailabilitySlot>> for WeeklySchedule {
    fn from(slots: Vec<AvailabilitySlot>) -> Self {
        Self::from_slots(slots)
    }
}

/// A free stretch between availability slots on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    pub day_of_week: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub duration_minutes: i32,
}

impl Gap {
    fn new(day_of_week: DayOfWeek, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            day_of_week,
            start_time,
            end_time,
            duration_minutes: end_time.minutes() - start_time.minutes(),
        }
    }
}

/// Slots grouped by weekday, each day sorted by start then end time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySlots([Vec<AvailabilitySlot>; 7]);

impl DaySlots {
    pub fn from_slots(slots: &[AvailabilitySlot]) -> Self {
        let mut days: [Vec<AvailabilitySlot>; 7] = Default::default();
        for slot in slots {
            days[slot.day_of_week.index()].push(*slot);
        }
        for day in &mut days {
            day.sort_by_key(|s| (s.start_time, s.end_time));
        }
        Self(days)
    }

    pub fn get(&self, day: DayOfWeek) -> &[AvailabilitySlot] {
        &self.0[day.index()]
    }

    pub fn has_any(&self, day: DayOfWeek) -> bool {
        !self.0[day.index()].is_empty()
    }

    /// Days with at least one slot, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &[AvailabilitySlot])> {
        DayOfWeek::ALL
            .into_iter()
            .map(move |d| (d, self.get(d)))
            .filter(|(_, slots)| !slots.is_empty())
    }
}

impl Index<DayOfWeek> for DaySlots {
    type Output = [AvailabilitySlot];

    fn index(&self, day: DayOfWeek) -> &Self::Output {
        self.get(day)
    }
}

/// A stored collection being edited in place.
///
/// Unlike [`WeeklySchedule::from_records_lossy`], records that do not parse are
/// kept verbatim and in position, so writing the collection back to the
/// profile never loses entries. They take no part in validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredSlots {
    records: Vec<SlotRecord>,
}

impl StoredSlots {
    pub fn new(records: Vec<SlotRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SlotRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SlotRecord> {
        self.records
    }

    /// Records that could not be read as slots, in collection order.
    pub fn unparsed(&self) -> impl Iterator<Item = &SlotRecord> {
        self.records.iter().filter(|r| r.to_slot().is_err())
    }

    /// The readable slots, for display and validation.
    pub fn schedule(&self) -> WeeklySchedule {
        WeeklySchedule::from_slots(self.parsed().collect())
    }

    /// Validate `candidate` against the readable slots and prepend it on success.
    pub fn add(
        &mut self,
        candidate: AvailabilitySlot,
        validator: &SlotValidator,
    ) -> Result<(), Rejection> {
        let existing: Vec<AvailabilitySlot> = self.parsed().collect();
        if let Err(rejection) = validator.validate(&candidate, &existing) {
            tracing::debug!(slot = %candidate, %rejection, "availability slot rejected");
            return Err(rejection);
        }
        tracing::debug!(slot = %candidate, kept_unparsed = self.unparsed().count(), "availability slot added");
        self.records.insert(0, SlotRecord::from(&candidate));
        Ok(())
    }

    /// Remove the first record that reads as `slot`. Returns whether one was removed.
    pub fn remove(&mut self, slot: &AvailabilitySlot) -> bool {
        match self.records.iter().position(|r| r.to_slot().ok().as_ref() == Some(slot)) {
            Some(index) => {
                self.records.remove(index);
                tracing::debug!(%slot, "availability slot removed");
                true
            }
            None => false,
        }
    }

    fn parsed(&self) -> impl Iterator<Item = AvailabilitySlot> + '_ {
        self.records.iter().filter_map(|r| r.to_slot().ok())
    }
}

impl From<&WeeklySchedule> for StoredSlots {
    fn from(schedule: &WeeklySchedule) -> Self {
        Self::new(schedule.slots().iter().map(SlotRecord::from).collect())
    }
}
