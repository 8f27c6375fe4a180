//! Broadcast orchestration split into focused submodules.
//!
//! - [`engine`] - The per-run delivery loop (snapshot, check, send, mark)
//! - [`announce`] - Operator-facing entry points on [`Broadcaster`]
//!
//! The [`Broadcaster`] is the long-lived object a deployment constructs once:
//! it owns the database, the transport, the pacing policy, and the event
//! channel, and builds a fresh [`BroadcastEngine`](engine::BroadcastEngine)
//! for each announcement run.

mod announce;
mod engine;

pub use engine::BroadcastEngine;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::pacing::{IntervalPacer, Pacer};
use crate::transport::MessageTransport;
use crate::types::Event;
use std::sync::Arc;

/// Main broadcaster instance (cloneable - all fields are Arc-wrapped)
#[derive(Clone)]
pub struct Broadcaster {
    /// Database instance for persistence (wrapped in Arc for sharing across tasks)
    /// Public for integration tests to query delivery state
    pub db: Arc<Database>,
    /// Event broadcast channel sender (multiple subscribers supported)
    pub(crate) event_tx: tokio::sync::broadcast::Sender<Event>,
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// Message transport supplied by the deployment
    pub(crate) transport: Arc<dyn MessageTransport>,
    /// Pacing policy applied between consecutive sends
    pub(crate) pacer: Arc<dyn Pacer>,
}

impl Broadcaster {
    /// Create a new Broadcaster instance
    ///
    /// Opens (or creates) the SQLite database, runs migrations, and sets up
    /// the event broadcast channel. The transport is supplied by the caller;
    /// the core never talks to a messaging platform directly.
    pub async fn new(config: Config, transport: Arc<dyn MessageTransport>) -> Result<Self> {
        let db = Database::new(&config.database_path).await?;

        let (event_tx, _rx) = tokio::sync::broadcast::channel(config.event_buffer);

        let pacer: Arc<dyn Pacer> = Arc::new(IntervalPacer::new(config.send_pacing));

        Ok(Self {
            db: Arc::new(db),
            event_tx,
            config: Arc::new(config),
            transport,
            pacer,
        })
    }

    /// Subscribe to broadcast events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. A subscriber that falls behind by more than the
    /// configured buffer receives `RecvError::Lagged`.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }
}
