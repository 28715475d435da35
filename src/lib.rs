//! Client library for a college room/schedule lookup API.
//!
//! The crate has three layers:
//!
//! - [`api`]: the typed HTTP client, its closed error taxonomy, and the
//!   injected session store. Read operations retry exactly once with an
//!   extended timeout when the first attempt times out; a 401 clears
//!   the stored session.
//! - [`schedule`]: pure transformations — resolving "today" in the
//!   college's fixed timezone (Asia/Baghdad, UTC+3), flattening one
//!   day's lectures across academic stages, and ordering a student's
//!   weekly schedule for display.
//! - [`view`]: the fetch → transform pipeline for "today's lectures"
//!   (with the secondary-study-type fallback) and a generation-tagged
//!   slot that discards stale results from overlapping fetches.
//!
//! All fetched data is an immutable snapshot: nothing is cached or
//! persisted across calls.

pub mod api;
pub mod schedule;
pub mod view;

pub use api::{ApiClient, ApiConfig, ApiError, MemorySessionStore, SessionStore};
pub use api::types::{DayKey, StudyType};
