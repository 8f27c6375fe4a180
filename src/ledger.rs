//! Delivery ledger contract
//!
//! The ledger is the sole arbiter of "already delivered": one durable record
//! per (announcement, recipient) pair, inserted the moment a send succeeds
//! and never updated or deleted. Its uniqueness constraint is what makes
//! re-running an announcement after a crash or retry safe.
//!
//! [`Database`](crate::db::Database) is the crate's implementation; the trait
//! exists so engine tests can exercise failing ledgers and so deployments can
//! substitute their own storage.

use crate::Result;
use crate::types::RecipientId;
use async_trait::async_trait;

/// Durable record of which (announcement, recipient) pairs were delivered
#[async_trait]
pub trait DeliveryLedger: Send + Sync {
    /// Whether a delivery record exists for this pair
    ///
    /// Side-effect free; safe to call any number of times.
    async fn has_delivered(&self, announcement_id: &str, recipient: RecipientId) -> Result<bool>;

    /// Insert a delivery record if absent
    ///
    /// Idempotent: marking the same pair twice is a no-op, not an error.
    /// Must be atomic with respect to concurrent callers. Fails only on
    /// storage I/O errors.
    async fn mark_delivered(&self, announcement_id: &str, recipient: RecipientId) -> Result<()>;
}
