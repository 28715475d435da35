//! "Today's lectures" pipeline: resolve the Baghdad-local day and the
//! likely study type, fetch, fall back to the other study type when the
//! primary payload is empty, then normalize.

use crate::api::types::{DayKey, FlattenedLecture, StudyType};
use crate::api::{ApiClient, ApiError};
use crate::schedule::{extract_day_lectures, infer_study_type, resolve_day_key};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Result of the today pipeline.
#[derive(Debug, Clone)]
pub struct TodayLectures {
    /// The Baghdad-local day the lectures belong to.
    pub day: DayKey,
    /// The study type whose schedule is being shown.
    pub study_type: StudyType,
    /// Ordered lectures; empty means "no lectures today".
    pub lectures: Vec<FlattenedLecture>,
}

/// Fetches today's lectures for a room.
///
/// The study type is inferred from the hour; when the primary fetch
/// returns an empty or missing weekly schedule, the other study type is
/// tried once before concluding there is nothing to show. The fallback
/// is unconditional on emptiness: an evening-only room queried in the
/// morning still finds its schedule.
pub async fn today_lectures(
    client: &ApiClient,
    room_code: &str,
    now: DateTime<Utc>,
) -> Result<TodayLectures, ApiError> {
    let day = resolve_day_key(now);
    let primary = infer_study_type(now);
    info!(room = room_code, day = %day, study_type = %primary, "resolving today's lectures");

    let mut study_type = primary;
    let mut schedule = client.room_schedule(room_code, primary).await?;
    if schedule.is_empty() {
        let secondary = primary.other();
        debug!(
            room = room_code,
            study_type = %secondary,
            "primary study type came back empty, trying the other one"
        );
        schedule = client.room_schedule(room_code, secondary).await?;
        study_type = secondary;
    }

    let lectures = extract_day_lectures(&schedule, day);
    Ok(TodayLectures {
        day,
        study_type,
        lectures,
    })
}
