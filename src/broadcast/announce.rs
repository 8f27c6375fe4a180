//! Operator-facing entry points.

use crate::error::Result;
use crate::types::{Announcement, AnnouncementFile, DeliveryReport, RecipientId};
use std::path::{Path, PathBuf};

use super::{BroadcastEngine, Broadcaster};

impl Broadcaster {
    /// Broadcast an announcement to every known recipient
    ///
    /// Builds the announcement (generating an identifier from the current
    /// time when `announcement_id` is omitted), runs the delivery loop
    /// against the crate's own store and ledger, and returns a one-line
    /// summary for the operator.
    ///
    /// Re-issuing the same `announcement_id` is safe: recipients that already
    /// have a delivery record are skipped, so a re-run only reaches those the
    /// previous run missed.
    pub async fn announce(
        &self,
        text: impl Into<String>,
        media: Option<PathBuf>,
        announcement_id: Option<String>,
    ) -> Result<String> {
        let announcement = match announcement_id {
            Some(id) => Announcement::with_id(id, text, media),
            None => Announcement::new(text, media),
        };

        let report = self.run_broadcast(&announcement).await?;
        Ok(format!("Announcement {}: {}", announcement.id, report.summary()))
    }

    /// Broadcast an announcement prepared in a JSON file
    ///
    /// See [`AnnouncementFile`] for the expected format.
    pub async fn announce_from_file(&self, path: &Path) -> Result<String> {
        let announcement = AnnouncementFile::load(path).await?.into_announcement();

        let report = self.run_broadcast(&announcement).await?;
        Ok(format!("Announcement {}: {}", announcement.id, report.summary()))
    }

    /// Run a fully constructed announcement and return the raw report
    ///
    /// For callers that want the counts rather than the formatted summary.
    pub async fn run_broadcast(&self, announcement: &Announcement) -> Result<DeliveryReport> {
        let engine = BroadcastEngine::new(
            self.db.clone(),
            self.transport.clone(),
            self.db.clone(),
            self.pacer.clone(),
        )
        .with_read_error_policy(self.config.read_error_policy)
        .with_events(self.event_tx.clone());

        engine.run(announcement).await
    }

    /// Register a recipient on first contact
    ///
    /// Idempotent; call it from the deployment's message handler for every
    /// incoming user. Returns true if the recipient was new.
    pub async fn register_recipient(&self, recipient: RecipientId) -> Result<bool> {
        self.db.register_recipient(recipient).await
    }

    /// Count registered recipients
    pub async fn recipient_count(&self) -> Result<u64> {
        self.db.recipient_count().await
    }
}
