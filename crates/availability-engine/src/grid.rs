//! Month and week calendar grids annotated with weekly availability.
//!
//! Grids are Monday-first. A month grid is always 6 rows of 7 days so the view
//! never changes height between months; leading and trailing days from the
//! neighbouring months are included (flagged `is_current_period = false`) and
//! still carry their availability so the UI can render them dimmed.

use chrono::{Datelike, Days, Local, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::schedule::DaySlots;
use crate::slot::AvailabilitySlot;
use crate::weekday::DayOfWeek;

/// Cells in a month grid: 6 weeks x 7 days.
pub const MONTH_GRID_DAYS: usize = 42;

/// Cells in a week grid.
pub const WEEK_GRID_DAYS: usize = 7;

/// One cell of a calendar grid. Recomputed on every render, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_number: u32,
    pub is_current_period: bool,
    pub is_today: bool,
    pub has_availability: bool,
    pub slots: Vec<AvailabilitySlot>,
}

/// Builds calendar grids relative to a fixed "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGridBuilder {
    today: NaiveDate,
}

impl CalendarGridBuilder {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Today according to the host's local clock.
    pub fn local() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Today as seen in `tz`, for teachers whose profile timezone differs from the host.
    pub fn in_timezone(tz: Tz) -> Self {
        Self::new(Utc::now().with_timezone(&tz).date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Date-only comparison; time of day never matters.
    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    /// 42 days covering the month containing `reference_month`, starting on the
    /// Monday on or before the 1st.
    pub fn build_month_grid(
        &self,
        reference_month: NaiveDate,
        slots: &[AvailabilitySlot],
    ) -> Vec<CalendarDay> {
        let first = first_of_month(reference_month);
        let start = monday_of_week(first);
        let index = DaySlots::from_slots(slots);

        tracing::trace!(%first, %start, slots = slots.len(), "building month grid");

        start
            .iter_days()
            .take(MONTH_GRID_DAYS)
            .map(|date| {
                let in_month = date.year() == first.year() && date.month() == first.month();
                self.day(date, in_month, &index)
            })
            .collect()
    }

    /// The 7 days of the Monday-started week containing `reference_week`.
    pub fn build_week_grid(
        &self,
        reference_week: NaiveDate,
        slots: &[AvailabilitySlot],
    ) -> Vec<CalendarDay> {
        let start = monday_of_week(reference_week);
        let index = DaySlots::from_slots(slots);

        tracing::trace!(%start, slots = slots.len(), "building week grid");

        start
            .iter_days()
            .take(WEEK_GRID_DAYS)
            .map(|date| self.day(date, true, &index))
            .collect()
    }

    fn day(&self, date: NaiveDate, is_current_period: bool, index: &DaySlots) -> CalendarDay {
        let slots = index.get(DayOfWeek::of(date)).to_vec();
        CalendarDay {
            date,
            day_number: date.day(),
            is_current_period,
            is_today: self.is_today(date),
            has_availability: !slots.is_empty(),
            slots,
        }
    }
}

/// Whether `date` is the host's current local date.
pub fn is_today(date: NaiveDate) -> bool {
    CalendarGridBuilder::local().is_today(date)
}

/// The Monday on or before `date`. A Sunday belongs to the week that started
/// six days earlier.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(offset))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month.
    date.with_day(1).unwrap_or(date)
}

/// Move by whole months, clamping the day to the target month's length
/// (Jan 31 + 1 month = Feb 28/29).
pub fn shift_month(reference: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        reference.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        reference.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(reference)
}

/// Move by whole weeks.
pub fn shift_week(reference: NaiveDate, weeks: i32) -> NaiveDate {
    let days = Days::new(u64::from(weeks.unsigned_abs()) * 7);
    let shifted = if weeks >= 0 {
        reference.checked_add_days(days)
    } else {
        reference.checked_sub_days(days)
    };
    shifted.unwrap_or(reference)
}

/// Header text for a month view, e.g. `"February 2026"`.
pub fn month_title(reference: NaiveDate) -> String {
    reference.format("%B %Y").to_string()
}
