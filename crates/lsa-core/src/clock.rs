//! Injectable wall-clock source.
//!
//! Handlers stamp `created`, `timestamp` and `uptime` through this trait so
//! tests can pin time.

use std::time::Duration;

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Time elapsed since `since`, clamped to zero if the clock went back.
    fn elapsed(&self, since: DateTime<Utc>) -> Duration {
        (self.now() - since).to_std().unwrap_or_default()
    }
}

/// Zero-sized type that delegates to `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
