//! Expiry policy for cache entries.

use std::time::Duration;

use rand::Rng;

/// Default lifetime of a cache entry.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Base TTL plus an optional random jitter.
///
/// Jitter spreads expiries of entries written together so they do not all
/// fall through to the store at the same instant.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use unhash::outbound::cache::CacheTtl;
///
/// let ttl = CacheTtl::new(Duration::from_secs(60)).with_jitter(Duration::from_secs(5));
/// let next = ttl.next_ttl();
/// assert!(next >= Duration::from_secs(60) && next <= Duration::from_secs(65));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    base: Duration,
    jitter: Duration,
}

impl CacheTtl {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            jitter: Duration::ZERO,
        }
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn jitter(&self) -> Duration {
        self.jitter
    }

    /// Lifetime to apply to the next write, in whole seconds.
    pub fn next_ttl(&self) -> Duration {
        let jitter_secs = self.jitter.as_secs();
        let extra = if jitter_secs == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=jitter_secs)
        };
        // Redis `EX` rejects zero, so the floor is one second.
        Duration::from_secs(self.base.as_secs().saturating_add(extra).max(1))
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
