//! Generation-tagged view-state slot.
//!
//! Without tagging, two overlapping fetches for the same slot race:
//! whichever result lands last wins, even if it belongs to the older
//! request. The slot hands out a generation per fetch and only applies
//! a result whose generation is still the latest; stale results are
//! discarded silently.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Token identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Holds the latest applied value for one logical piece of view state.
pub struct FetchSlot<T> {
    latest: AtomicU64,
    value: Mutex<Option<T>>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            value: Mutex::new(None),
        }
    }

    /// Registers a new fetch, superseding all earlier generations.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies `value` if `generation` is still the latest. Returns
    /// whether the value was applied.
    pub fn complete(&self, generation: Generation, value: T) -> bool {
        if generation.0 != self.latest.load(Ordering::SeqCst) {
            debug!(
                generation = generation.0,
                latest = self.latest.load(Ordering::SeqCst),
                "discarding stale fetch result"
            );
            return false;
        }
        *self.value.lock().unwrap() = Some(value);
        true
    }

    /// Takes the current value out of the slot, leaving it empty.
    pub fn take(&self) -> Option<T> {
        self.value.lock().unwrap().take()
    }
}

impl<T: Clone> FetchSlot<T> {
    /// Clones the current value, if any.
    pub fn get(&self) -> Option<T> {
        self.value.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_generation_applies() {
        let slot = FetchSlot::new();
        let generation = slot.begin();
        assert!(slot.complete(generation, 7));
        assert_eq!(slot.get(), Some(7));
    }

    #[test]
    fn stale_generation_is_discarded() {
        let slot = FetchSlot::new();
        let old = slot.begin();
        let new = slot.begin();

        // Newer fetch resolves first; the older one arrives late.
        assert!(slot.complete(new, "fresh"));
        assert!(!slot.complete(old, "stale"));
        assert_eq!(slot.get(), Some("fresh"));
    }

    #[test]
    fn superseded_fetch_cannot_fill_an_empty_slot() {
        let slot: FetchSlot<u32> = FetchSlot::new();
        let old = slot.begin();
        let _in_flight = slot.begin();

        assert!(!slot.complete(old, 1));
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn take_empties_the_slot() {
        let slot = FetchSlot::new();
        let generation = slot.begin();
        slot.complete(generation, 3);
        assert_eq!(slot.take(), Some(3));
        assert_eq!(slot.get(), None);
    }
}
