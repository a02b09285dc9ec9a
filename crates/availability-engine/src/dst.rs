//! DST transition policies for projecting wall-clock slots onto real dates.

use serde::{Deserialize, Serialize};

/// Policy for a session whose local start time does not exist on a given date
/// (e.g., 02:30 on the night clocks spring forward).
///
/// Ambiguous local times (the repeated hour in autumn) always resolve to the
/// earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop sessions that start in the DST gap.
    Skip,
    /// Start at the first valid instant after the gap (02:30 becomes 03:00).
    ShiftForward,
    /// Keep the pre-transition UTC offset, so the nominal time slides by the
    /// gap length (02:30 becomes 03:30).
    #[default]
    WallClock,
}
