//! Error types for quiz-broadcast
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Database, Transport, Config)
//! - The run-level precondition error (`RecipientSourceUnavailable`)
//! - Classification of transport failures as transient or permanent

use thiserror::Error;

/// Result type alias for quiz-broadcast operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quiz-broadcast
///
/// This is the primary error type used throughout the library. Per-recipient
/// transport failures never surface through this type during a broadcast run;
/// they are counted in the [`DeliveryReport`](crate::types::DeliveryReport)
/// instead. The [`Transport`](Error::Transport) variant exists for callers
/// that invoke a transport directly, outside of a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "database_path")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// The recipient snapshot could not be obtained; the run was aborted
    /// before any send
    #[error("recipient source unavailable: {0}")]
    RecipientSourceUnavailable(String),

    /// Message transport failed
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to database
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to run migrations
    #[error("failed to run migrations: {0}")]
    MigrationFailed(String),

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// Per-recipient transport failures
///
/// Every variant is isolated inside a broadcast run: the failing recipient is
/// counted and the run continues with the next one.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The platform could not reach the recipient (network failure, timeout)
    #[error("recipient unreachable: {0}")]
    Unreachable(String),

    /// The recipient has blocked the bot
    #[error("blocked by recipient")]
    Blocked,

    /// The recipient identifier is not valid on the platform
    #[error("invalid recipient")]
    InvalidRecipient,

    /// The platform rejected the send due to rate limiting
    #[error("rate limited by platform")]
    RateLimited,

    /// Any other transport failure
    #[error("{0}")]
    Unknown(String),
}

impl TransportError {
    /// Returns true if a later re-run of the same announcement may succeed
    /// for this recipient.
    ///
    /// Transient failures (network trouble, rate limiting) are worth a re-run;
    /// permanent ones (blocked, invalid recipient) are not. The engine never
    /// retries within a run either way; this classification is for callers
    /// deciding whether to re-issue the announcement.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Unreachable(_) => true,
            TransportError::RateLimited => true,
            TransportError::Blocked => false,
            TransportError::InvalidRecipient => false,
            // Unknown errors - be conservative and treat as permanent
            TransportError::Unknown(_) => false,
        }
    }
}
