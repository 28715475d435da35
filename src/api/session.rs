//! Session storage for the auth token and user profile.
//!
//! The store is an explicit capability handed to the client at
//! construction rather than an ambient global, so tests can inject
//! their own instance and observe the 401 clearing side effect.

use super::types::UserProfile;
use std::sync::RwLock;

/// Process-wide session state: a bearer token plus the profile blob
/// that came with it. Nothing survives the process; a fresh run starts
/// unauthenticated.
pub trait SessionStore: Send + Sync {
    /// Current bearer token, if authenticated.
    fn token(&self) -> Option<String>;

    /// Profile stored alongside the token.
    fn profile(&self) -> Option<UserProfile>;

    /// Replaces the stored session.
    fn set(&self, token: String, profile: UserProfile);

    /// Drops both token and profile.
    fn clear(&self);
}

/// In-memory store used at the composition root.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<(String, UserProfile)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|(token, _)| token.clone())
    }

    fn profile(&self) -> Option<UserProfile> {
        self.inner
            .read()
            .unwrap()
            .as_ref()
            .map(|(_, profile)| profile.clone())
    }

    fn set(&self, token: String, profile: UserProfile) {
        *self.inner.write().unwrap() = Some((token, profile));
    }

    fn clear(&self) {
        *self.inner.write().unwrap() = None;
    }
}
