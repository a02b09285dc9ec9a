//! Plain-text rendering of grids, slots and audit results.

use availability_engine::duration::humanize_minutes;
use availability_engine::grid::month_title;
use availability_engine::{AvailabilitySlot, CalendarDay, Gap, SlotOverlap};
use chrono::{Datelike, NaiveDate};

const HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Month view, one row per week. `*` marks availability in the month,
/// `+` availability on a neighbouring month's day, brackets mark today.
pub fn month(reference: NaiveDate, grid: &[CalendarDay]) -> String {
    let mut out = format!("{}\n", month_title(reference));
    for name in HEADER {
        out.push_str(&format!(" {}  ", name));
    }
    out.push('\n');

    for week in grid.chunks(7) {
        let row: String = week.iter().map(cell).collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str("* available  + available (other month)  [ ] today\n");
    out
}

fn cell(day: &CalendarDay) -> String {
    let (open, close) = if day.is_today { ('[', ']') } else { (' ', ' ') };
    let mark = match (day.has_availability, day.is_current_period) {
        (true, true) => '*',
        (true, false) => '+',
        (false, _) => ' ',
    };
    format!("{}{:>2}{}{}", open, day.day_number, mark, close)
}

/// Week view, one line per day with its slots and their durations.
pub fn week(grid: &[CalendarDay]) -> String {
    grid.iter()
        .map(|day| {
            let slots = if day.slots.is_empty() {
                "-".to_string()
            } else {
                day.slots.iter().map(slot_with_duration).collect::<Vec<_>>().join(", ")
            };
            let today = if day.is_today { " (today)" } else { "" };
            format!("{} {}{}  {}\n", HEADER[day.date.weekday().num_days_from_monday() as usize], day.date, today, slots)
        })
        .collect()
}

fn slot_with_duration(slot: &AvailabilitySlot) -> String {
    format!(
        "{}-{} ({})",
        slot.start_time,
        slot.end_time,
        humanize_minutes(slot.duration_minutes().max(0).unsigned_abs())
    )
}

pub fn slot_list(slots: &[AvailabilitySlot]) -> String {
    slots
        .iter()
        .map(|s| format!("{:<9} {}\n", s.day_of_week, slot_with_duration(s)))
        .collect()
}

pub fn overlaps(found: &[SlotOverlap]) -> String {
    found
        .iter()
        .map(|o| format!("{} overlaps {} by {} min\n", o.first, o.second, o.overlap_minutes))
        .collect()
}

pub fn gaps(found: &[Gap]) -> String {
    found
        .iter()
        .map(|g| {
            format!(
                "{}-{} ({})\n",
                g.start_time,
                g.end_time,
                humanize_minutes(g.duration_minutes.max(0).unsigned_abs())
            )
        })
        .collect()
}
