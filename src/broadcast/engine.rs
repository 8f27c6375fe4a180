//! The per-run delivery loop.

use crate::config::ReadErrorPolicy;
use crate::error::{Error, Result};
use crate::ledger::DeliveryLedger;
use crate::pacing::Pacer;
use crate::recipients::RecipientSource;
use crate::transport::MessageTransport;
use crate::types::{Announcement, DeliveryReport, Event};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Orchestrates a single announcement run
///
/// The run is deliberately sequential: recipients are processed one at a
/// time in snapshot order, with the pacing delay between consecutive send
/// attempts. One engine instance serves one or more runs; it holds no
/// per-run state.
///
/// Two concurrent runs only share the ledger, whose insert-if-absent is
/// atomic. Concurrent runs of the *same* announcement id can still each send
/// once to a recipient that neither has marked yet; callers wanting a
/// stronger guarantee should serialize runs per announcement id.
pub struct BroadcastEngine {
    recipients: Arc<dyn RecipientSource>,
    transport: Arc<dyn MessageTransport>,
    ledger: Arc<dyn DeliveryLedger>,
    pacer: Arc<dyn Pacer>,
    read_error_policy: ReadErrorPolicy,
    event_tx: Option<tokio::sync::broadcast::Sender<Event>>,
    cancel: CancellationToken,
}

impl BroadcastEngine {
    /// Create an engine from its four collaborators
    pub fn new(
        recipients: Arc<dyn RecipientSource>,
        transport: Arc<dyn MessageTransport>,
        ledger: Arc<dyn DeliveryLedger>,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            recipients,
            transport,
            ledger,
            pacer,
            read_error_policy: ReadErrorPolicy::default(),
            event_tx: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the policy applied when a ledger read fails
    #[must_use]
    pub fn with_read_error_policy(mut self, policy: ReadErrorPolicy) -> Self {
        self.read_error_policy = policy;
        self
    }

    /// Emit run events on this channel
    #[must_use]
    pub fn with_events(mut self, event_tx: tokio::sync::broadcast::Sender<Event>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Use an externally owned cancellation token
    ///
    /// Cancelling the token stops the run before its next recipient; the
    /// partial report is still returned.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run one announcement against the current recipient snapshot
    ///
    /// The only error this returns is the precondition failure
    /// ([`Error::RecipientSourceUnavailable`]): once the snapshot is in hand,
    /// every per-recipient outcome is absorbed into the report and the run
    /// completes. Even a fully-failed run yields a report.
    pub async fn run(&self, announcement: &Announcement) -> Result<DeliveryReport> {
        let snapshot = self
            .recipients
            .list_recipients()
            .await
            .map_err(|e| match e {
                Error::RecipientSourceUnavailable(_) => e,
                other => Error::RecipientSourceUnavailable(other.to_string()),
            })?;

        let mut report = DeliveryReport::new(snapshot.len() as u64);

        tracing::info!(
            announcement_id = %announcement.id,
            total = report.total,
            "starting broadcast"
        );
        self.emit(Event::BroadcastStarted {
            announcement_id: announcement.id.clone(),
            total: report.total,
        });

        // Pacing is owed after a send attempt and paid immediately before the
        // next one, so a trailing attempt never sleeps and skips in between
        // stay free.
        let mut owe_pause = false;

        for recipient in snapshot {
            if self.cancel.is_cancelled() {
                tracing::info!(
                    announcement_id = %announcement.id,
                    sent = report.sent,
                    "broadcast cancelled, returning partial report"
                );
                break;
            }

            let delivered = match self.ledger.has_delivered(&announcement.id, recipient).await {
                Ok(delivered) => delivered,
                Err(e) => match self.read_error_policy {
                    ReadErrorPolicy::FailRecipient => {
                        tracing::warn!(
                            announcement_id = %announcement.id,
                            recipient = %recipient,
                            error = %e,
                            "ledger read failed, counting recipient as failed"
                        );
                        report.failed += 1;
                        self.emit(Event::DeliveryFailed {
                            announcement_id: announcement.id.clone(),
                            recipient,
                            error: e.to_string(),
                        });
                        continue;
                    }
                    ReadErrorPolicy::AssumeUndelivered => {
                        tracing::warn!(
                            announcement_id = %announcement.id,
                            recipient = %recipient,
                            error = %e,
                            "ledger read failed, proceeding as undelivered (duplicate risk)"
                        );
                        false
                    }
                },
            };

            if delivered {
                report.skipped += 1;
                tracing::debug!(
                    announcement_id = %announcement.id,
                    recipient = %recipient,
                    "already delivered, skipping"
                );
                self.emit(Event::DeliverySkipped {
                    announcement_id: announcement.id.clone(),
                    recipient,
                });
                continue;
            }

            if owe_pause {
                self.pacer.pause().await;
            }
            owe_pause = true;

            match self.transport.send(recipient, announcement).await {
                Ok(()) => {
                    // The message is out; a ledger write failure must not
                    // downgrade it to a failure. The cost is a possible
                    // duplicate on a future re-run.
                    if let Err(e) = self.ledger.mark_delivered(&announcement.id, recipient).await {
                        tracing::warn!(
                            announcement_id = %announcement.id,
                            recipient = %recipient,
                            error = %e,
                            "delivered but failed to record in ledger; a re-run may resend"
                        );
                    }
                    report.sent += 1;
                    self.emit(Event::Delivered {
                        announcement_id: announcement.id.clone(),
                        recipient,
                    });
                }
                Err(e) => {
                    // One bad recipient never aborts the batch
                    report.failed += 1;
                    tracing::warn!(
                        announcement_id = %announcement.id,
                        recipient = %recipient,
                        error = %e,
                        "send failed"
                    );
                    self.emit(Event::DeliveryFailed {
                        announcement_id: announcement.id.clone(),
                        recipient,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            announcement_id = %announcement.id,
            sent = report.sent,
            failed = report.failed,
            skipped = report.skipped,
            "broadcast finished"
        );
        self.emit(Event::BroadcastFinished {
            announcement_id: announcement.id.clone(),
            report,
        });

        Ok(report)
    }

    /// Emit an event if a channel is attached
    ///
    /// send() returns Err if there are no receivers, which is fine - we just
    /// drop the event.
    fn emit(&self, event: Event) {
        if let Some(tx) = &self.event_tx {
            tx.send(event).ok();
        }
    }
}
