//! WASM bindings for availability-engine.
//!
//! Exposes calendar grids, slot validation, durations, overlap audits and session
//! projection to the browser UI via `wasm-bindgen`. All complex types are passed
//! as JSON strings; slot collections use the profile API shape
//! (`[{"dayOfWeek":"monday","startTime":"09:00","endTime":"10:00"}]`).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/availability-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::slot::SlotRecord;
use availability_engine::{
    duration, find_overlaps, AvailabilitySlot, CalendarGridBuilder, DstPolicy, DurationStyle,
    Rejection, SlotDuration, SlotValidator, StoredSlots, WeeklySchedule,
};
use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationDto<'a> {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<&'a Rejection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<'a> From<&'a Result<(), Rejection>> for ValidationDto<'a> {
    fn from(result: &'a Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self {
                accepted: true,
                rejection: None,
                message: None,
            },
            Err(rejection) => Self {
                accepted: false,
                rejection: Some(rejection),
                message: Some(rejection.to_string()),
            },
        }
    }
}

#[derive(Serialize)]
struct AddSlotDto<'a> {
    #[serde(flatten)]
    validation: ValidationDto<'a>,
    slots: &'a StoredSlots,
}

// ---------------------------------------------------------------------------
// Helpers: parse JSON/ISO inputs. Errors are plain strings so they can be
// exercised off-wasm; the exports turn them into `JsValue`s.
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", s, e))
}

/// Slot collections from stored profiles are read leniently: malformed entries
/// are dropped rather than failing the whole view.
fn parse_slots_json(json: &str) -> Result<Vec<AvailabilitySlot>, String> {
    let records: Vec<SlotRecord> =
        serde_json::from_str(json).map_err(|e| format!("Invalid slots JSON: {}", e))?;
    Ok(WeeklySchedule::from_records_lossy(&records).into_slots())
}

fn parse_candidate_json(json: &str) -> Result<AvailabilitySlot, String> {
    let record: SlotRecord =
        serde_json::from_str(json).map_err(|e| format!("Invalid slot JSON: {}", e))?;
    record.to_slot().map_err(|e| e.to_string())
}

fn parse_policy(policy: Option<&str>) -> Result<DstPolicy, String> {
    match policy {
        None | Some("wall_clock") => Ok(DstPolicy::WallClock),
        Some("skip") => Ok(DstPolicy::Skip),
        Some("shift_forward") => Ok(DstPolicy::ShiftForward),
        Some(other) => Err(format!(
            "Unknown DST policy '{}'. Expected skip, shift_forward or wall_clock",
            other
        )),
    }
}

fn builder(today: Option<&str>) -> Result<CalendarGridBuilder, String> {
    match today {
        Some(today) => Ok(CalendarGridBuilder::new(parse_date(today)?)),
        None => Ok(CalendarGridBuilder::local()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn month_grid(reference: &str, slots_json: &str, today: Option<&str>) -> Result<String, String> {
    let grid = builder(today)?.build_month_grid(parse_date(reference)?, &parse_slots_json(slots_json)?);
    to_json(&grid)
}

fn week_grid(reference: &str, slots_json: &str, today: Option<&str>) -> Result<String, String> {
    let grid = builder(today)?.build_week_grid(parse_date(reference)?, &parse_slots_json(slots_json)?);
    to_json(&grid)
}

fn validate(candidate_json: &str, existing_json: &str, min_minutes: Option<u32>) -> Result<String, String> {
    let candidate = parse_candidate_json(candidate_json)?;
    let existing = parse_slots_json(existing_json)?;
    let validator = min_minutes.map(SlotValidator::new).unwrap_or_default();
    let result = validator.validate(&candidate, &existing);
    to_json(&ValidationDto::from(&result))
}

fn add(candidate_json: &str, existing_json: &str, min_minutes: Option<u32>) -> Result<String, String> {
    let candidate = parse_candidate_json(candidate_json)?;
    let mut stored: StoredSlots =
        serde_json::from_str(existing_json).map_err(|e| format!("Invalid slots JSON: {}", e))?;
    let validator = min_minutes.map(SlotValidator::new).unwrap_or_default();
    let result = stored.add(candidate, &validator);
    to_json(&AddSlotDto {
        validation: ValidationDto::from(&result),
        slots: &stored,
    })
}

fn human_duration(start: &str, end: &str) -> Result<String, String> {
    match duration::format(start, end, DurationStyle::Human).map_err(|e| e.to_string())? {
        SlotDuration::Human(text) => Ok(text),
        SlotDuration::Minutes(m) => Ok(m.to_string()),
    }
}

fn raw_duration(start: &str, end: &str) -> Result<i32, String> {
    match duration::format(start, end, DurationStyle::Minutes).map_err(|e| e.to_string())? {
        SlotDuration::Minutes(m) => Ok(m),
        SlotDuration::Human(text) => Err(format!("Unexpected duration text '{}'", text)),
    }
}

fn overlaps(slots_json: &str) -> Result<String, String> {
    to_json(&find_overlaps(&parse_slots_json(slots_json)?))
}

fn sessions(
    slots_json: &str,
    from: &str,
    to: &str,
    timezone: &str,
    policy: Option<&str>,
    lesson_minutes: Option<u32>,
) -> Result<String, String> {
    let schedule = WeeklySchedule::from_slots(parse_slots_json(slots_json)?);
    let projected = availability_engine::project_sessions(
        &schedule,
        parse_date(from)?,
        parse_date(to)?,
        timezone,
        parse_policy(policy)?,
    )
    .map_err(|e| e.to_string())?;

    match lesson_minutes {
        Some(minutes) => to_json(
            &projected
                .iter()
                .flat_map(|s| s.split(minutes))
                .collect::<Vec<_>>(),
        ),
        None => to_json(&projected),
    }
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Build the 42-day, Monday-first grid for the month containing `reference`.
///
/// `reference` and `today` are `YYYY-MM-DD`; `today` defaults to the host date.
/// Returns a JSON array of `CalendarDay` objects.
#[wasm_bindgen(js_name = "buildMonthGrid")]
pub fn build_month_grid(reference: &str, slots_json: &str, today: Option<String>) -> Result<String, JsValue> {
    month_grid(reference, slots_json, today.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Build the 7-day grid for the Monday-started week containing `reference`.
#[wasm_bindgen(js_name = "buildWeekGrid")]
pub fn build_week_grid(reference: &str, slots_json: &str, today: Option<String>) -> Result<String, JsValue> {
    week_grid(reference, slots_json, today.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Check a candidate slot against an existing collection without modifying it.
///
/// Returns `{"accepted":true}` or
/// `{"accepted":false,"rejection":{"kind":"overlap",...},"message":"..."}`.
#[wasm_bindgen(js_name = "validateSlot")]
pub fn validate_slot(candidate_json: &str, existing_json: &str, min_minutes: Option<u32>) -> Result<String, JsValue> {
    validate(candidate_json, existing_json, min_minutes).map_err(|e| JsValue::from_str(&e))
}

/// Validate and, if accepted, prepend the candidate. The returned `slots` field
/// is the collection to send to the profile API; entries that could not be read
/// are passed through unchanged.
#[wasm_bindgen(js_name = "addSlot")]
pub fn add_slot(candidate_json: &str, existing_json: &str, min_minutes: Option<u32>) -> Result<String, JsValue> {
    add(candidate_json, existing_json, min_minutes).map_err(|e| JsValue::from_str(&e))
}

/// Human-readable duration ("1 hr 30 mins"). Throws `Invalid` when `end` is before `start`.
#[wasm_bindgen(js_name = "formatDuration")]
pub fn format_duration(start: &str, end: &str) -> Result<String, JsValue> {
    human_duration(start, end).map_err(|e| JsValue::from_str(&e))
}

/// Raw `end - start` in minutes; may be zero or negative.
#[wasm_bindgen(js_name = "durationMinutes")]
pub fn duration_minutes(start: &str, end: &str) -> Result<i32, JsValue> {
    raw_duration(start, end).map_err(|e| JsValue::from_str(&e))
}

/// Same-day overlapping pairs in a stored collection.
#[wasm_bindgen(js_name = "findOverlaps")]
pub fn find_slot_overlaps(slots_json: &str) -> Result<String, JsValue> {
    overlaps(slots_json).map_err(|e| JsValue::from_str(&e))
}

/// Dated UTC sessions for `[from, to]` in `timezone`, optionally split into lessons.
#[wasm_bindgen(js_name = "projectSessions")]
pub fn project_sessions(
    slots_json: &str,
    from: &str,
    to: &str,
    timezone: &str,
    policy: Option<String>,
    lesson_minutes: Option<u32>,
) -> Result<String, JsValue> {
    sessions(slots_json, from, to, timezone, policy.as_deref(), lesson_minutes)
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const SLOTS: &str = r#"[
        {"dayOfWeek":"Monday","startTime":"09:00","endTime":"10:00"},
        {"dayOfWeek":"Blursday","startTime":"09:00","endTime":"10:00"}
    ]"#;

    #[test]
    fn month_grid_json_skips_malformed_days() {
        let json: Value = serde_json::from_str(&month_grid("2026-02-01", SLOTS, Some("2026-02-10")).unwrap()).unwrap();
        let days = json.as_array().unwrap();

        assert_eq!(days.len(), 42);
        let available = days.iter().filter(|d| d["hasAvailability"] == true).count();
        assert_eq!(available, 6);
    }

    #[test]
    fn week_grid_json_marks_today() {
        let json: Value = serde_json::from_str(&week_grid("2026-02-15", "[]", Some("2026-02-10")).unwrap()).unwrap();
        assert_eq!(json[0]["date"], "2026-02-09");
        assert_eq!(json[1]["isToday"], true);
    }

    #[test]
    fn bad_reference_date_is_an_error() {
        assert!(month_grid("Feb 2026", "[]", None).unwrap_err().starts_with("Invalid date"));
    }

    #[test]
    fn validate_reports_overlap_message() {
        let candidate = r#"{"dayOfWeek":"monday","startTime":"09:30","endTime":"10:30"}"#;
        let json: Value = serde_json::from_str(&validate(candidate, SLOTS, None).unwrap()).unwrap();

        assert_eq!(json["accepted"], false);
        assert_eq!(json["rejection"]["kind"], "overlap");
        assert_eq!(json["message"], "Slot overlaps an existing one (monday 09:00-10:00)");
    }

    #[test]
    fn add_prepends_accepted_slot() {
        let candidate = r#"{"dayOfWeek":"monday","startTime":"10:00","endTime":"11:00"}"#;
        let json: Value = serde_json::from_str(&add(candidate, SLOTS, None).unwrap()).unwrap();

        assert_eq!(json["accepted"], true);
        assert!(json.get("rejection").is_none());
        assert_eq!(json["slots"][0]["startTime"], "10:00");
        assert_eq!(json["slots"].as_array().unwrap().len(), 3);
        // The unreadable Blursday entry is written back as it came in.
        assert_eq!(json["slots"][2]["dayOfWeek"], "Blursday");
    }

    #[test]
    fn malformed_candidate_is_an_error() {
        let candidate = r#"{"dayOfWeek":"monday","startTime":"9","endTime":"10:00"}"#;
        assert!(add(candidate, "[]", None).is_err());
    }

    #[test]
    fn durations() {
        assert_eq!(human_duration("09:00", "17:00").unwrap(), "8 hrs");
        assert_eq!(human_duration("09:00", "08:00").unwrap_err(), "Invalid");
        assert_eq!(raw_duration("09:00", "09:30").unwrap(), 30);
    }

    #[test]
    fn sessions_split_into_lessons() {
        let json: Value = serde_json::from_str(
            &sessions(SLOTS, "2026-02-09", "2026-02-09", "UTC", None, Some(30)).unwrap(),
        )
        .unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["start"], "2026-02-09T09:00:00Z");
    }

    #[test]
    fn unknown_policy_rejected() {
        assert!(parse_policy(Some("sometimes")).is_err());
    }
}
