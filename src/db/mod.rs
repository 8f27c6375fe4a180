//! Database layer for quiz-broadcast
//!
//! Handles SQLite persistence for recipients and delivery records.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`] — Database lifecycle, schema migrations
//! - [`recipients`] — Recipient registration and snapshot queries
//! - [`deliveries`] — Delivery ledger (insert-if-absent, point lookup)

use crate::types::RecipientId;
use sqlx::{FromRow, sqlite::SqlitePool};

mod deliveries;
mod migrations;
mod recipients;

/// Recipient record from database
#[derive(Debug, Clone, FromRow)]
pub struct Recipient {
    /// Platform user ID
    pub id: RecipientId,
    /// Unix timestamp of first contact with the bot
    pub registered_at: i64,
}

/// Delivery record from database
///
/// Append-only audit row: one per (announcement, recipient) pair, created the
/// instant a send succeeds.
#[derive(Debug, Clone, FromRow)]
pub struct DeliveryRecord {
    /// Announcement identifier
    pub announcement_id: String,
    /// Recipient the announcement was delivered to
    pub recipient_id: RecipientId,
    /// Unix timestamp of the successful send
    pub delivered_at: i64,
}

/// Database handle for quiz-broadcast
pub struct Database {
    pool: SqlitePool,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
