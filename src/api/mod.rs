//! Transport layer: typed client, error taxonomy, session store, and
//! the wire types shared with the rest of the crate.

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
pub use session::{MemorySessionStore, SessionStore};
