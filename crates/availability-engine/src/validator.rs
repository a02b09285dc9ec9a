//! Gatekeeper for adding a slot to a teacher's weekly availability.
//!
//! Checks run in a fixed order and the first failure wins:
//! duplicate, ordering, overlap, minimum duration.

use serde::Serialize;
use thiserror::Error;

use crate::slot::AvailabilitySlot;

/// Shortest slot a teacher may publish, in minutes.
pub const DEFAULT_MIN_SLOT_MINUTES: u32 = 15;

/// Why a candidate slot was refused. Messages are shown to the end user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Rejection {
    #[error("This time slot already exists")]
    DuplicateSlot,

    #[error("End time must be after start time")]
    InvalidOrdering,

    #[error("Slot overlaps an existing one ({existing})")]
    Overlap { existing: AvailabilitySlot },

    #[error("Slot must be at least {minimum} minutes long (got {minutes})")]
    TooShort { minutes: i32, minimum: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotValidator {
    min_duration_minutes: u32,
}

impl Default for SlotValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SLOT_MINUTES)
    }
}

impl SlotValidator {
    pub fn new(min_duration_minutes: u32) -> Self {
        Self {
            min_duration_minutes,
        }
    }

    pub fn min_duration_minutes(&self) -> u32 {
        self.min_duration_minutes
    }

    /// Decide whether `candidate` may join `existing`.
    ///
    /// The overlap test is half-open: `[09:00,10:00)` and `[10:00,11:00)` on the
    /// same day are both allowed.
    pub fn validate(
        &self,
        candidate: &AvailabilitySlot,
        existing: &[AvailabilitySlot],
    ) -> Result<(), Rejection> {
        if existing.iter().any(|slot| slot == candidate) {
            return Err(Rejection::DuplicateSlot);
        }

        if candidate.start_time >= candidate.end_time {
            return Err(Rejection::InvalidOrdering);
        }

        if let Some(existing) = existing.iter().find(|slot| candidate.overlaps(slot)) {
            return Err(Rejection::Overlap {
                existing: *existing,
            });
        }

        let minutes = candidate.duration_minutes();
        if i64::from(minutes) < i64::from(self.min_duration_minutes) {
            return Err(Rejection::TooShort {
                minutes,
                minimum: self.min_duration_minutes,
            });
        }

        Ok(())
    }
}
