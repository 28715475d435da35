//! Wire types for the room/schedule API.
//!
//! Every endpoint wraps its payload in the `{success, data, message}`
//! envelope; `data` being absent is not a protocol error (schedule
//! endpoints legitimately return nothing for an empty study type).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Response envelope used by every API endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Morning/evening class-schedule variant for a room or department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyType {
    Morning,
    Evening,
}

impl StudyType {
    /// The opposite variant, used by the secondary-study-type fallback.
    pub fn other(self) -> Self {
        match self {
            StudyType::Morning => StudyType::Evening,
            StudyType::Evening => StudyType::Morning,
        }
    }

    /// Lowercase key as it appears in query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            StudyType::Morning => "morning",
            StudyType::Evening => "evening",
        }
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morning" => Ok(StudyType::Morning),
            "evening" => Ok(StudyType::Evening),
            other => Err(format!("unknown study type: {other}")),
        }
    }
}

/// One of the seven weekdays used as a schedule index.
///
/// The index mapping (0=Sunday .. 6=Saturday) matches the weekly
/// schedule maps returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayKey {
    /// All days in fixed display order (the academic week starts on Sunday).
    pub const ALL: [DayKey; 7] = [
        DayKey::Sunday,
        DayKey::Monday,
        DayKey::Tuesday,
        DayKey::Wednesday,
        DayKey::Thursday,
        DayKey::Friday,
        DayKey::Saturday,
    ];

    /// Maps a day index (0=Sunday .. 6=Saturday) to its key.
    pub fn from_index(index: u32) -> DayKey {
        DayKey::ALL[(index % 7) as usize]
    }

    /// Lowercase key as it appears in weekly schedule maps.
    pub fn as_str(self) -> &'static str {
        match self {
            DayKey::Sunday => "sunday",
            DayKey::Monday => "monday",
            DayKey::Tuesday => "tuesday",
            DayKey::Wednesday => "wednesday",
            DayKey::Thursday => "thursday",
            DayKey::Friday => "friday",
            DayKey::Saturday => "saturday",
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        DayKey::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| format!("unknown day: {s}"))
    }
}

/// Theoretical lectures are held per section, practical ones per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LectureType {
    Theoretical,
    Practical,
}

/// A single lecture slot within a weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureEntry {
    pub subject_name: String,
    /// "HH:MM" or "HH:MM:SS".
    pub start_time: String,
    pub end_time: String,
    pub lecture_type: LectureType,
    /// When set, overrides `start_time` for ordering purposes.
    #[serde(default)]
    pub postponed_start_time: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub assistant_name: Option<String>,
    /// Meaningful for practical lectures.
    #[serde(default)]
    pub group: Option<String>,
    /// Meaningful for theoretical lectures.
    #[serde(default)]
    pub section: Option<String>,
}

/// Weekly schedule: day key -> stage key -> ordered lecture list.
///
/// An absent day or stage means "no lectures", never an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    pub days: HashMap<String, HashMap<String, Vec<LectureEntry>>>,
}

impl WeeklySchedule {
    /// Stage map for the given day, if the API returned one.
    pub fn day(&self, day: DayKey) -> Option<&HashMap<String, Vec<LectureEntry>>> {
        self.days.get(day.as_str())
    }

    /// True when no day carries any lecture at all.
    pub fn is_empty(&self) -> bool {
        self.days
            .values()
            .all(|stages| stages.values().all(|list| list.is_empty()))
    }
}

/// A lecture entry tagged with the academic stage it came from.
///
/// Produced only by the day normalizer; transient, display-only.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedLecture {
    pub stage: String,
    pub entry: LectureEntry,
}

/// One scheduled class instance from a student's full schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentScheduleRow {
    /// Lowercase day name ("sunday" .. "saturday").
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub subject_name: String,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub instructor_name: Option<String>,
    pub lecture_type: LectureType,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Payload returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// Authenticated user profile blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
}

/// An academic department.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// A physical room.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub id: String,
    /// Opaque lookup code printed next to the room door.
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub department_name: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// An announcement posted to a room's board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A student record resolved by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub study_type: Option<StudyType>,
    #[serde(default)]
    pub department_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_success_payload() {
        let json = r#"{"success": true, "data": {"id": "d1", "name": "Physics"}}"#;
        let env: Envelope<Department> = serde_json::from_str(json).unwrap();
        assert!(env.success);
        assert_eq!(env.data.unwrap().name, "Physics");
        assert!(env.message.is_none());
    }

    #[test]
    fn envelope_decodes_failure_without_data() {
        let json = r#"{"success": false, "message": "not found"}"#;
        let env: Envelope<Department> = serde_json::from_str(json).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("not found"));
    }

    #[test]
    fn study_type_other_flips() {
        assert_eq!(StudyType::Morning.other(), StudyType::Evening);
        assert_eq!(StudyType::Evening.other(), StudyType::Morning);
    }

    #[test]
    fn day_key_index_roundtrip() {
        assert_eq!(DayKey::from_index(0), DayKey::Sunday);
        assert_eq!(DayKey::from_index(6), DayKey::Saturday);
        assert_eq!(DayKey::from_index(3), DayKey::Wednesday);
    }

    #[test]
    fn day_key_parses_case_insensitively() {
        assert_eq!("Tuesday".parse::<DayKey>().unwrap(), DayKey::Tuesday);
        assert!("someday".parse::<DayKey>().is_err());
    }

    #[test]
    fn weekly_schedule_decodes_nested_map() {
        let json = r#"{
            "sunday": {
                "first": [{
                    "subjectName": "Calculus",
                    "startTime": "08:30",
                    "endTime": "10:30",
                    "lectureType": "theoretical",
                    "section": "A"
                }]
            }
        }"#;
        let schedule: WeeklySchedule = serde_json::from_str(json).unwrap();
        assert!(!schedule.is_empty());
        let stages = schedule.day(DayKey::Sunday).unwrap();
        assert_eq!(stages["first"][0].subject_name, "Calculus");
        assert!(stages["first"][0].postponed_start_time.is_none());
    }

    #[test]
    fn schedule_with_only_empty_stage_lists_is_empty() {
        let json = r#"{"monday": {"second": []}}"#;
        let schedule: WeeklySchedule = serde_json::from_str(json).unwrap();
        assert!(schedule.is_empty());
    }
}
