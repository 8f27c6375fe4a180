//! Shared test doubles for broadcast engine and facade tests.

use crate::config::Config;
use crate::error::{DatabaseError, Error, Result, TransportError};
use crate::ledger::DeliveryLedger;
use crate::pacing::Pacer;
use crate::recipients::RecipientSource;
use crate::transport::MessageTransport;
use crate::types::{Announcement, RecipientId};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tempfile::tempdir;

use super::Broadcaster;

/// Transport double that records every send attempt with its start time
pub(crate) struct RecordingTransport {
    sends: Mutex<Vec<(RecipientId, Instant)>>,
    fail_for: HashSet<RecipientId>,
}

impl RecordingTransport {
    /// Transport where every send succeeds
    pub(crate) fn new() -> Self {
        Self {
            sends: Mutex::new(Vec::new()),
            fail_for: HashSet::new(),
        }
    }

    /// Transport that fails (Unreachable) for the given recipients
    pub(crate) fn failing_for(fail_for: impl IntoIterator<Item = RecipientId>) -> Self {
        Self {
            sends: Mutex::new(Vec::new()),
            fail_for: fail_for.into_iter().collect(),
        }
    }

    /// Recipients in the order send was attempted for them
    pub(crate) fn sent(&self) -> Vec<RecipientId> {
        self.sends.lock().unwrap().iter().map(|(r, _)| *r).collect()
    }

    /// Start times of each send attempt, in order
    pub(crate) fn send_times(&self) -> Vec<Instant> {
        self.sends.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn send(
        &self,
        recipient: RecipientId,
        _announcement: &Announcement,
    ) -> std::result::Result<(), TransportError> {
        self.sends.lock().unwrap().push((recipient, Instant::now()));
        if self.fail_for.contains(&recipient) {
            Err(TransportError::Unreachable("simulated outage".into()))
        } else {
            Ok(())
        }
    }
}

/// Pacer double that counts pauses instead of sleeping
pub(crate) struct CountingPacer {
    pauses: AtomicU64,
}

impl CountingPacer {
    pub(crate) fn new() -> Self {
        Self {
            pauses: AtomicU64::new(0),
        }
    }

    pub(crate) fn pauses(&self) -> u64 {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }
}

/// Recipient source double backed by a fixed list
pub(crate) struct StaticRecipients(pub(crate) Vec<RecipientId>);

#[async_trait]
impl RecipientSource for StaticRecipients {
    async fn list_recipients(&self) -> Result<Vec<RecipientId>> {
        Ok(self.0.clone())
    }
}

/// Recipient source double that is always down
pub(crate) struct UnavailableRecipients;

#[async_trait]
impl RecipientSource for UnavailableRecipients {
    async fn list_recipients(&self) -> Result<Vec<RecipientId>> {
        Err(Error::Database(DatabaseError::QueryFailed(
            "store offline".into(),
        )))
    }
}

/// In-memory ledger with optional injected read/write failures
pub(crate) struct MemoryLedger {
    records: Mutex<HashSet<(String, i64)>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryLedger {
    pub(crate) fn new() -> Self {
        Self {
            records: Mutex::new(HashSet::new()),
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub(crate) fn with_failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::new()
        }
    }

    pub(crate) fn with_failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub(crate) fn contains(&self, announcement_id: &str, recipient: RecipientId) -> bool {
        self.records
            .lock()
            .unwrap()
            .contains(&(announcement_id.to_string(), recipient.get()))
    }

    pub(crate) fn insert(&self, announcement_id: &str, recipient: RecipientId) {
        self.records
            .lock()
            .unwrap()
            .insert((announcement_id.to_string(), recipient.get()));
    }
}

#[async_trait]
impl DeliveryLedger for MemoryLedger {
    async fn has_delivered(&self, announcement_id: &str, recipient: RecipientId) -> Result<bool> {
        if self.fail_reads {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "ledger read failed".into(),
            )));
        }
        Ok(self.contains(announcement_id, recipient))
    }

    async fn mark_delivered(&self, announcement_id: &str, recipient: RecipientId) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "ledger write failed".into(),
            )));
        }
        self.insert(announcement_id, recipient);
        Ok(())
    }
}

/// Helper to create a test Broadcaster over a tempdir database with zero
/// pacing. Returns the broadcaster and the tempdir (which must be kept
/// alive).
pub(crate) async fn create_test_broadcaster(
    transport: Arc<dyn MessageTransport>,
) -> (Broadcaster, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let config = Config {
        database_path: temp_dir.path().join("test.db"),
        send_pacing: Duration::ZERO,
        ..Default::default()
    };

    let broadcaster = Broadcaster::new(config, transport).await.unwrap();
    (broadcaster, temp_dir)
}
