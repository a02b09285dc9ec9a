//! # availability-engine
//!
//! Weekly availability for a tutoring marketplace: the slots a teacher publishes,
//! the rules for adding one, and the calendar views that show them.
//!
//! Everything here is pure computation over in-memory values. Persisting a
//! [`WeeklySchedule`] to the profile API is the caller's job.
//!
//! ## Modules
//!
//! - [`weekday`] — `DayOfWeek`, Monday-first, case-insensitive parsing
//! - [`time`] — `TimeOfDay`, zero-padded `HH:mm` wall-clock times
//! - [`slot`] — `AvailabilitySlot` and the loosely typed `SlotRecord`
//! - [`validator`] — duplicate / ordering / overlap / minimum-length checks
//! - [`schedule`] — the slot collection, per-day index, free gaps
//! - [`grid`] — 42-day month grids and 7-day week grids
//! - [`duration`] — minute counts and "1 hr 30 mins" text
//! - [`conflict`] — overlap audit for collections saved elsewhere
//! - [`sessions`] — slots projected onto dates as UTC sessions
//! - [`dst`] — DST gap policies for session projection
//! - [`config`] — TOML engine configuration
//! - [`error`] — Error types

pub mod config;
pub mod conflict;
pub mod dst;
pub mod duration;
pub mod error;
pub mod grid;
pub mod schedule;
pub mod sessions;
pub mod slot;
pub mod time;
pub mod validator;
pub mod weekday;

pub use config::EngineConfig;
pub use conflict::{find_overlaps, SlotOverlap};
pub use dst::DstPolicy;
pub use duration::{format_duration, minutes_between, DurationError, DurationStyle, SlotDuration};
pub use error::AvailabilityError;
pub use grid::{CalendarDay, CalendarGridBuilder};
pub use schedule::{DaySlots, Gap, StoredSlots, WeeklySchedule};
pub use sessions::{project_sessions, Session};
pub use slot::{AvailabilitySlot, SlotRecord};
pub use time::TimeOfDay;
pub use validator::{Rejection, SlotValidator};
pub use weekday::DayOfWeek;
