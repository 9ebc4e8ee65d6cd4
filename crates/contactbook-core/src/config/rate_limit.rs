//! Rate limit configuration.

use serde::{Deserialize, Serialize};

/// A "`times` requests per `seconds`" policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitRule {
    /// Burst size.
    pub times: u32,
    /// Window over which `times` requests are refilled.
    pub seconds: u64,
}

impl RateLimitRule {
    pub const fn new(times: u32, seconds: u64) -> Self {
        Self { times, seconds }
    }
}

/// Rate limits applied to contact routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Master switch.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Listing and fetching single contacts.
    #[serde(default = "default_reads")]
    pub reads: RateLimitRule,
    /// Create, update, delete, and block.
    #[serde(default = "default_writes")]
    pub writes: RateLimitRule,
    /// Search and birthday queries.
    #[serde(default = "default_lookups")]
    pub lookups: RateLimitRule,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            reads: default_reads(),
            writes: default_writes(),
            lookups: default_lookups(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_reads() -> RateLimitRule {
    RateLimitRule::new(2, 5)
}

fn default_writes() -> RateLimitRule {
    RateLimitRule::new(1, 10)
}

fn default_lookups() -> RateLimitRule {
    RateLimitRule::new(1, 5)
}
