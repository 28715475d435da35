//! Schedule transformations: fixed-timezone day resolution, per-day
//! lecture normalization, and student schedule flattening.

pub mod day;
pub mod normalize;
pub mod student;

pub use day::{infer_study_type, resolve_day_key};
pub use normalize::{effective_start_seconds, extract_day_lectures, parse_time_seconds};
pub use student::{flatten_student_schedule, format_time_12h, StudentScheduleEntry};
