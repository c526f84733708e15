//! Time-bounded cache of resolved utility locations.
//!
//! - Keyed by (utility, requested version); `None` is a distinct key
//! - Expiry is lazy: staleness is checked on read, never by a sweeper
//! - Internally synchronized, safe to share across tasks

mod clock;
mod entry;
mod store;

pub use clock::{Clock, SystemClock};
pub use entry::{CacheKey, CachedEntry, fingerprint};
pub use store::{CacheStats, DEFAULT_CACHE_TTL, UtilPathCache};
