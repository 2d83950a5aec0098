use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

/// Lets at most one passive progress update through per period.
pub struct ProgressThrottle {
    limiter: Option<DefaultDirectRateLimiter>,
}

impl ProgressThrottle {
    /// A zero period admits every update.
    pub fn new(period: Duration) -> Self {
        let limiter = Quota::with_period(period)
            .map(|quota| RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));
        Self { limiter }
    }

    pub fn admit(&self) -> bool {
        self.limiter.as_ref().is_none_or(|l| l.check().is_ok())
    }
}

impl fmt::Debug for ProgressThrottle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressThrottle")
            .field("enabled", &self.limiter.is_some())
            .finish()
    }
}
