//! Fixed-timezone "today" and study-type resolution.
//!
//! The college runs on Baghdad wall-clock time, so both functions
//! convert the instant through a fixed UTC+3 offset and never consult
//! the host's local timezone. Iraq abolished daylight saving in 2008,
//! which is what makes a fixed offset sufficient here.

use crate::api::types::{DayKey, StudyType};
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

/// Asia/Baghdad is a fixed UTC+3.
const BAGHDAD_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Evening classes start at 16:00 local time.
const EVENING_START_HOUR: u32 = 16;

fn baghdad() -> FixedOffset {
    // Three hours east is always within chrono's valid offset range.
    FixedOffset::east_opt(BAGHDAD_UTC_OFFSET_SECS).unwrap()
}

/// Resolves the instant to the Baghdad-local day of week
/// (Sunday=0 .. Saturday=6).
pub fn resolve_day_key(instant: DateTime<Utc>) -> DayKey {
    let local = instant.with_timezone(&baghdad());
    DayKey::from_index(local.weekday().num_days_from_sunday())
}

/// Infers the study type from the Baghdad-local hour: 16:00 and later
/// is evening, everything before is morning.
pub fn infer_study_type(instant: DateTime<Utc>) -> StudyType {
    let local = instant.with_timezone(&baghdad());
    if local.hour() >= EVENING_START_HOUR {
        StudyType::Evening
    } else {
        StudyType::Morning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_resolution_ignores_utc_day_boundary() {
        // 21:30 UTC on Saturday Jan 6 is already 00:30 Sunday in Baghdad.
        let instant = Utc.with_ymd_and_hms(2024, 1, 6, 21, 30, 0).unwrap();
        assert_eq!(instant.weekday().num_days_from_sunday(), 6); // Saturday in UTC
        assert_eq!(resolve_day_key(instant), DayKey::Sunday);
    }

    #[test]
    fn midday_resolves_to_same_civil_day() {
        // Wednesday Jan 10 2024, 09:00 UTC = 12:00 Baghdad.
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        assert_eq!(resolve_day_key(instant), DayKey::Wednesday);
    }

    #[test]
    fn study_type_boundary_is_inclusive_on_the_evening_side() {
        // 12:59 UTC = 15:59 Baghdad.
        let before = Utc.with_ymd_and_hms(2024, 1, 10, 12, 59, 0).unwrap();
        assert_eq!(infer_study_type(before), StudyType::Morning);

        // 13:00 UTC = 16:00 Baghdad, exactly on the boundary.
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 13, 0, 0).unwrap();
        assert_eq!(infer_study_type(at), StudyType::Evening);
    }

    #[test]
    fn late_night_is_morning_study_type() {
        // 23:00 UTC = 02:00 Baghdad the next day.
        let instant = Utc.with_ymd_and_hms(2024, 1, 10, 23, 0, 0).unwrap();
        assert_eq!(infer_study_type(instant), StudyType::Morning);
    }
}
