//! View-layer helpers: the today pipeline and the generation-tagged
//! state slot that guards against stale overlapping fetches.

pub mod slot;
pub mod today;

pub use slot::{FetchSlot, Generation};
pub use today::{today_lectures, TodayLectures};
