//! Message transport contract
//!
//! The core does not talk to any messaging platform itself; it only defines
//! the send capability it requires. Deployments implement [`MessageTransport`]
//! on top of their platform client (Telegram, Discord, a test double) and
//! hand it to the [`Broadcaster`](crate::broadcast::Broadcaster).

use crate::error::TransportError;
use crate::types::{Announcement, RecipientId};
use async_trait::async_trait;

/// Send capability over the messaging platform
///
/// A send is external and irreversible: once the platform accepts the
/// message there is no rollback, which is why the engine records deliveries
/// in the ledger rather than trying to undo anything.
///
/// Implementations should honor the announcement's optional media attachment
/// (send photo with caption when present, plain text otherwise) and apply
/// their own per-send timeout; the engine imposes none.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Deliver the announcement to a single recipient
    async fn send(
        &self,
        recipient: RecipientId,
        announcement: &Announcement,
    ) -> Result<(), TransportError>;
}
