//! # quiz-broadcast
//!
//! Backend library for the announcement side of a chat quiz bot: broadcast a
//! message to every known recipient exactly once, survive per-recipient
//! failures, respect the platform's outbound rate limit, and keep a durable
//! delivery ledger so retries and restarts never double-send.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Transport-agnostic** - The messaging platform lives behind a trait
//!   supplied by the deployment; the core never talks to a platform itself
//! - **Ledger-anchored** - Idempotency comes from an atomic insert-if-absent
//!   on the (announcement, recipient) pair, not from in-memory state
//! - **Event-driven** - Consumers subscribe to run events, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use quiz_broadcast::{
//!     Announcement, Broadcaster, Config, MessageTransport, RecipientId, TransportError,
//! };
//! use std::sync::Arc;
//!
//! struct MyTransport; // wraps your platform client
//!
//! #[async_trait::async_trait]
//! impl MessageTransport for MyTransport {
//!     async fn send(
//!         &self,
//!         recipient: RecipientId,
//!         announcement: &Announcement,
//!     ) -> Result<(), TransportError> {
//!         // deliver announcement.body (and announcement.media) to recipient
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let broadcaster = Broadcaster::new(Config::default(), Arc::new(MyTransport)).await?;
//!
//!     // Register recipients as they first talk to the bot
//!     broadcaster.register_recipient(RecipientId::new(1302211108)).await?;
//!
//!     // Operator command: broadcast to everyone, deduplicated by id
//!     let summary = broadcaster
//!         .announce("We added new question types!", None, Some("update_1".into()))
//!         .await?;
//!     println!("{summary}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Operator authorization policies
pub mod auth;
/// Broadcast engine and operator facade
pub mod broadcast;
/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Delivery ledger contract
pub mod ledger;
/// Send pacing between outbound messages
pub mod pacing;
/// Recipient source contract
pub mod recipients;
/// Message transport contract
pub mod transport;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use auth::{AllowList, AuthorizationPolicy};
pub use broadcast::{BroadcastEngine, Broadcaster};
pub use config::{Config, ReadErrorPolicy};
pub use db::Database;
pub use error::{DatabaseError, Error, Result, TransportError};
pub use ledger::DeliveryLedger;
pub use pacing::{IntervalPacer, NoPacing, Pacer};
pub use recipients::RecipientSource;
pub use transport::MessageTransport;
pub use types::{Announcement, AnnouncementFile, DeliveryReport, Event, RecipientId};
