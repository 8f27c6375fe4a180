//! Recipient source contract
//!
//! The engine reads the recipient list exactly once per run, before the first
//! send, and operates on that fixed snapshot: a recipient registered mid-run
//! is picked up by the next run, not retroactively included in this one.

use crate::Result;
use crate::types::RecipientId;
use async_trait::async_trait;

/// Enumerates the known recipients
///
/// [`Database`](crate::db::Database) implements this over its recipients
/// table. The returned order must be deterministic (the engine's processing
/// order follows it), though no particular order is semantically meaningful.
///
/// An error here aborts the run before any send, surfaced as
/// [`Error::RecipientSourceUnavailable`](crate::Error::RecipientSourceUnavailable).
#[async_trait]
pub trait RecipientSource: Send + Sync {
    /// Snapshot the current recipient list
    async fn list_recipients(&self) -> Result<Vec<RecipientId>>;
}
