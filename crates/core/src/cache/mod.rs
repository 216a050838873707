//! In-memory expiring cache for widget results.
//!
//! Entries carry their own TTL and are only served while fresh. There is no
//! persistence; the cache lives as long as the [`ExpiringCache`] value that
//! owns it.
//!
//! - Lazy eviction on read
//! - Opportunistic sweep of expired entries once the map grows past a threshold
//! - Injectable [`Clock`] so expiry can be driven by a simulated clock in tests

pub mod clock;
pub mod expiring;
pub mod hash;

pub use clock::{Clock, ManualClock, SystemClock};
pub use expiring::{CacheStats, ExpiringCache};
pub use hash::compute_cache_key;
