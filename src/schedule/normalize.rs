//! Flattens one day of a weekly schedule into a single ordered lecture
//! list across all academic stages.

use crate::api::types::{DayKey, FlattenedLecture, LectureEntry, WeeklySchedule};

/// Known stages in academic order. Unknown stage keys sort after these,
/// alphabetically, so output order stays deterministic.
const STAGE_ORDER: [&str; 4] = ["first", "second", "third", "fourth"];

/// Extracts the given day's lectures across all stages, ordered by
/// effective start time.
///
/// A missing day, missing stages, or empty lists all yield an empty
/// vec; "no lectures today" is a state, not an error. The sort is
/// stable, so lectures with equal effective start times keep their
/// encounter order (stage order, then within-stage list order).
pub fn extract_day_lectures(schedule: &WeeklySchedule, day: DayKey) -> Vec<FlattenedLecture> {
    let Some(stages) = schedule.day(day) else {
        return Vec::new();
    };

    let mut stage_keys: Vec<&String> = stages.keys().collect();
    stage_keys.sort_by(|a, b| {
        stage_rank(a)
            .cmp(&stage_rank(b))
            .then_with(|| a.cmp(b))
    });

    let mut lectures = Vec::new();
    for stage in stage_keys {
        for entry in &stages[stage] {
            lectures.push(FlattenedLecture {
                stage: stage.clone(),
                entry: entry.clone(),
            });
        }
    }

    // sort_by_key is stable; ties keep encounter order.
    lectures.sort_by_key(|lecture| effective_start_seconds(&lecture.entry));
    lectures
}

fn stage_rank(key: &str) -> usize {
    STAGE_ORDER
        .iter()
        .position(|stage| *stage == key)
        .unwrap_or(STAGE_ORDER.len())
}

/// Start time in seconds used for ordering: the postponed start time
/// when one is set, else the nominal start time.
pub fn effective_start_seconds(entry: &LectureEntry) -> u32 {
    match &entry.postponed_start_time {
        Some(postponed) => parse_time_seconds(postponed),
        None => parse_time_seconds(&entry.start_time),
    }
}

/// Permissively parses "HH:MM" or "HH:MM:SS" into seconds.
///
/// Lenient by contract: missing or non-numeric components count as 0
/// and malformed input never raises, since schedule records are often
/// only partially populated.
pub fn parse_time_seconds(raw: &str) -> u32 {
    let mut parts = raw.split(':');
    let hours = numeric_component(parts.next());
    let minutes = numeric_component(parts.next());
    let seconds = numeric_component(parts.next());
    hours * 3600 + minutes * 60 + seconds
}

fn numeric_component(part: Option<&str>) -> u32 {
    part.and_then(|p| p.trim().parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::LectureType;
    use std::collections::HashMap;

    fn lecture(subject: &str, start: &str) -> LectureEntry {
        LectureEntry {
            subject_name: subject.to_string(),
            start_time: start.to_string(),
            end_time: "23:59".to_string(),
            lecture_type: LectureType::Theoretical,
            postponed_start_time: None,
            doctor_name: None,
            assistant_name: None,
            group: None,
            section: Some("A".to_string()),
        }
    }

    fn schedule_for(day: &str, stages: Vec<(&str, Vec<LectureEntry>)>) -> WeeklySchedule {
        let stage_map: HashMap<String, Vec<LectureEntry>> = stages
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let mut days = HashMap::new();
        days.insert(day.to_string(), stage_map);
        WeeklySchedule { days }
    }

    #[test]
    fn missing_day_yields_empty_list() {
        let schedule = WeeklySchedule::default();
        assert!(extract_day_lectures(&schedule, DayKey::Sunday).is_empty());
    }

    #[test]
    fn day_with_empty_stages_yields_empty_list() {
        let schedule = schedule_for("monday", vec![("first", vec![]), ("third", vec![])]);
        assert!(extract_day_lectures(&schedule, DayKey::Monday).is_empty());
    }

    #[test]
    fn lectures_are_ordered_by_start_time_across_stages() {
        let schedule = schedule_for(
            "sunday",
            vec![
                ("second", vec![lecture("Circuits", "10:30")]),
                ("first", vec![lecture("Calculus", "08:30")]),
                ("fourth", vec![lecture("Networks", "09:00")]),
            ],
        );
        let out = extract_day_lectures(&schedule, DayKey::Sunday);
        let subjects: Vec<&str> = out.iter().map(|l| l.entry.subject_name.as_str()).collect();
        assert_eq!(subjects, ["Calculus", "Networks", "Circuits"]);
        assert_eq!(out[0].stage, "first");
    }

    #[test]
    fn equal_start_times_keep_stage_then_list_order() {
        let schedule = schedule_for(
            "sunday",
            vec![
                ("second", vec![lecture("B1", "08:30"), lecture("B2", "08:30")]),
                ("first", vec![lecture("A1", "08:30")]),
            ],
        );
        let out = extract_day_lectures(&schedule, DayKey::Sunday);
        let subjects: Vec<&str> = out.iter().map(|l| l.entry.subject_name.as_str()).collect();
        assert_eq!(subjects, ["A1", "B1", "B2"]);
    }

    #[test]
    fn postponed_start_time_takes_precedence_for_ordering() {
        let mut postponed = lecture("Postponed", "09:00");
        postponed.postponed_start_time = Some("10:00".to_string());
        let schedule = schedule_for(
            "sunday",
            vec![("first", vec![postponed, lecture("Regular", "09:30")])],
        );
        let out = extract_day_lectures(&schedule, DayKey::Sunday);
        let subjects: Vec<&str> = out.iter().map(|l| l.entry.subject_name.as_str()).collect();
        assert_eq!(subjects, ["Regular", "Postponed"]);
    }

    #[test]
    fn unknown_stage_keys_sort_after_known_ones() {
        let schedule = schedule_for(
            "sunday",
            vec![
                ("postgraduate", vec![lecture("P", "08:00")]),
                ("fourth", vec![lecture("F", "08:00")]),
            ],
        );
        let out = extract_day_lectures(&schedule, DayKey::Sunday);
        let stages: Vec<&str> = out.iter().map(|l| l.stage.as_str()).collect();
        assert_eq!(stages, ["fourth", "postgraduate"]);
    }

    #[test]
    fn time_parsing_defaults_missing_seconds_to_zero() {
        assert_eq!(parse_time_seconds("08:30"), 8 * 3600 + 30 * 60);
        assert_eq!(parse_time_seconds("08:30:15"), 8 * 3600 + 30 * 60 + 15);
    }

    #[test]
    fn time_parsing_never_fails_on_malformed_input() {
        // Malformed fixtures: each degrades component-wise to zero.
        assert_eq!(parse_time_seconds(""), 0);
        assert_eq!(parse_time_seconds("garbage"), 0);
        assert_eq!(parse_time_seconds("xx:30"), 30 * 60);
        assert_eq!(parse_time_seconds("10:"), 10 * 3600);
    }

    #[test]
    fn effective_start_prefers_postponed_even_when_malformed() {
        let mut entry = lecture("X", "09:00");
        entry.postponed_start_time = Some("??".to_string());
        assert_eq!(effective_start_seconds(&entry), 0);
    }
}
