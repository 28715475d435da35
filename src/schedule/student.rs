//! Flattens a student's raw schedule rows into one display sequence.

use crate::api::types::{DayKey, StudentScheduleRow};

/// A display-ready schedule row: the raw row plus pre-rendered time
/// strings. Recomputed from scratch on every input change, never merged
/// with prior state.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentScheduleEntry {
    pub day: DayKey,
    pub row: StudentScheduleRow,
    /// "HH:MM - HH:MM".
    pub time_24h: String,
    /// Arabic-localized 12-hour form, e.g. "01:05 م - 02:35 م".
    pub time_12h: String,
}

/// Reorders raw rows by (fixed day order, start minutes) into a single
/// sequence. Rows tagged with an unrecognized day name are dropped;
/// ties within a day keep input order.
pub fn flatten_student_schedule(rows: &[StudentScheduleRow]) -> Vec<StudentScheduleEntry> {
    let mut out = Vec::with_capacity(rows.len());
    for day in DayKey::ALL {
        let mut day_rows: Vec<&StudentScheduleRow> = rows
            .iter()
            .filter(|row| row.day_of_week.eq_ignore_ascii_case(day.as_str()))
            .collect();
        // Stable sort; equal start minutes keep input order.
        day_rows.sort_by_key(|row| start_minutes(&row.start_time));

        for row in day_rows {
            out.push(StudentScheduleEntry {
                day,
                row: row.clone(),
                time_24h: format!("{} - {}", head_24h(&row.start_time), head_24h(&row.end_time)),
                time_12h: format!(
                    "{} - {}",
                    format_time_12h(&row.start_time),
                    format_time_12h(&row.end_time)
                ),
            });
        }
    }
    out
}

/// Minutes since midnight from the first five characters ("HH:MM").
/// Anything that does not match that shape yields 0; malformed rows
/// still render, they just sort first.
pub fn start_minutes(raw: &str) -> u32 {
    let Some(head) = raw.get(..5) else { return 0 };
    let Some((hours, minutes)) = head.split_once(':') else {
        return 0;
    };
    match (hours.parse::<u32>(), minutes.parse::<u32>()) {
        (Ok(h), Ok(m)) => h * 60 + m,
        _ => 0,
    }
}

/// Renders "HH:MM" into the 12-hour Arabic form: hour >= 12 gets the
/// "م" (pm) marker, earlier hours get "ص" (am); hours 0 and 12 both
/// display as 12. Input that does not look like a time passes through
/// unchanged.
pub fn format_time_12h(raw: &str) -> String {
    let Some(head) = raw.get(..5) else {
        return raw.to_string();
    };
    let Some((hours, minutes)) = head.split_once(':') else {
        return raw.to_string();
    };
    let (Ok(hour), Ok(minute)) = (hours.parse::<u32>(), minutes.parse::<u32>()) else {
        return raw.to_string();
    };

    let marker = if hour >= 12 { "م" } else { "ص" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hour:02}:{minute:02} {marker}")
}

/// First five characters of the raw time ("HH:MM"), dropping seconds.
fn head_24h(raw: &str) -> &str {
    raw.get(..5).unwrap_or(raw)
}
