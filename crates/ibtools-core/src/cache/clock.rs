//! Time source for cache expiry.

use chrono::{DateTime, Utc};

/// Supplies the current time to the cache.
///
/// Production code uses [`SystemClock`]; tests substitute a clock they can
/// advance by hand so TTL behaviour can be checked without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
