//! Send pacing between consecutive outbound messages
//!
//! The broadcast loop is sequential by design: the messaging platform
//! enforces a global outbound rate limit, and a fixed delay between sends is
//! the simplest correct way to stay under it. The delay lives behind the
//! [`Pacer`] trait so tests can observe pacing without wall-clock waits.

use async_trait::async_trait;
use std::time::Duration;

/// Pacing hook invoked between consecutive send attempts
///
/// The engine calls [`pause`](Pacer::pause) before every send attempt that
/// follows an earlier attempt in the same run. Skipped recipients never
/// trigger a pause.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait out the inter-send delay
    async fn pause(&self);
}

/// Pacer that sleeps a fixed minimum interval on the tokio timer
pub struct IntervalPacer {
    delay: Duration,
}

impl IntervalPacer {
    /// Create a pacer with the given minimum inter-send delay
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured inter-send delay
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Pacer that never waits
///
/// For tests and for transports that do their own rate limiting.
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}
