//! Project weekly availability onto concrete dates as UTC sessions.
//!
//! This is what a booking calendar offers for a selected date range: every date
//! whose weekday has slots yields one session per slot, with the slot's wall-clock
//! times interpreted in the teacher's IANA timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::dst::DstPolicy;
use crate::error::{AvailabilityError, Result};
use crate::schedule::WeeklySchedule;
use crate::slot::AvailabilitySlot;
use crate::weekday::DayOfWeek;

/// Longest DST gap searched when shifting forward. Real-world gaps are 30 or 60 minutes.
const MAX_GAP_MINUTES: i64 = 180;

/// A dated occurrence of a weekly slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub date: NaiveDate,
    pub slot: AvailabilitySlot,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Session {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Cut into back-to-back lessons of `lesson_minutes`. A trailing remainder
    /// shorter than one lesson is dropped.
    pub fn split(&self, lesson_minutes: u32) -> Vec<Session> {
        if lesson_minutes == 0 {
            return Vec::new();
        }
        let step = Duration::minutes(i64::from(lesson_minutes));
        let mut lessons = Vec::new();
        let mut cursor = self.start;
        while cursor + step <= self.end {
            lessons.push(Session {
                date: self.date,
                slot: self.slot,
                start: cursor,
                end: cursor + step,
            });
            cursor += step;
        }
        lessons
    }
}

/// Project `schedule` onto every date in `[from, to]` in the named timezone.
///
/// # Errors
/// Returns `AvailabilityError::InvalidTimezone` if `timezone` is not a valid IANA identifier.
pub fn project_sessions(
    schedule: &WeeklySchedule,
    from: NaiveDate,
    to: NaiveDate,
    timezone: &str,
    policy: DstPolicy,
) -> Result<Vec<Session>> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| AvailabilityError::InvalidTimezone(timezone.to_string()))?;
    Ok(project_sessions_in(schedule, from, to, tz, policy))
}

/// Same as [`project_sessions`] with an already-parsed timezone.
///
/// Sessions come out in date order, then slot start time. `from > to` yields nothing.
pub fn project_sessions_in(
    schedule: &WeeklySchedule,
    from: NaiveDate,
    to: NaiveDate,
    tz: Tz,
    policy: DstPolicy,
) -> Vec<Session> {
    let index = schedule.by_day();
    let mut sessions = Vec::new();

    for date in from.iter_days().take_while(|d| *d <= to) {
        for slot in index.get(DayOfWeek::of(date)) {
            if slot.start_time >= slot.end_time {
                continue;
            }
            let local_start = date.and_time(slot.start_time.to_naive_time());
            let local_end = date.and_time(slot.end_time.to_naive_time());

            let Some(start) = resolve_local(tz, local_start, policy) else {
                tracing::debug!(%date, %slot, "session skipped: start falls in DST gap");
                continue;
            };
            let end = match resolve_local(tz, local_end, DstPolicy::ShiftForward) {
                Some(end) if end > start => end,
                _ => continue,
            };
            sessions.push(Session {
                date,
                slot: *slot,
                start,
                end,
            });
        }
    }

    sessions
}

/// Map a local wall-clock time to UTC under `policy`.
fn resolve_local(tz: Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Skip => None,
            DstPolicy::ShiftForward => first_valid_after(tz, local),
            DstPolicy::WallClock => with_offset_before_gap(tz, local),
        },
    }
}

fn first_valid_after(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    (1..=MAX_GAP_MINUTES)
        .map(|m| local + Duration::minutes(m))
        .find_map(|candidate| tz.from_local_datetime(&candidate).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

fn with_offset_before_gap(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    let before = tz
        .from_local_datetime(&(local - Duration::minutes(MAX_GAP_MINUTES)))
        .earliest()?;
    let offset_seconds = before.offset().fix().local_minus_utc();
    Some((local - Duration::seconds(i64::from(offset_seconds))).and_utc())
}
