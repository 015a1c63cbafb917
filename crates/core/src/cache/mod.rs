//! In-memory response cache.
//!
//! Process-local, TTL-bounded storage of successful responses keyed by a
//! request fingerprint. There is no size bound beyond TTL eviction.

pub mod hash;
pub mod store;

pub use hash::compute_fingerprint;
pub use store::{DEFAULT_TTL, ResponseCache};
