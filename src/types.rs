//! Core types for quiz-broadcast

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unique identifier for a recipient (the platform user ID)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(pub i64);

impl RecipientId {
    /// Create a new RecipientId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RecipientId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecipientId> for i64 {
    fn from(id: RecipientId) -> Self {
        id.0
    }
}

impl PartialEq<i64> for RecipientId {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<RecipientId> for i64 {
    fn eq(&self, other: &RecipientId) -> bool {
        *self == other.0
    }
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecipientId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// Implement sqlx Type, Encode, and Decode for database operations
impl sqlx::Type<sqlx::Sqlite> for RecipientId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for RecipientId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for RecipientId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// One broadcast message with a unique identifier
///
/// Immutable once constructed. Only the identifier is persisted (through
/// delivery records); the announcement itself lives for the duration of a
/// single run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Announcement {
    /// Unique identifier for deduplication across runs
    pub id: String,
    /// Message text
    pub body: String,
    /// Optional media attachment sent alongside the text
    pub media: Option<PathBuf>,
}

impl Announcement {
    /// Create an announcement with an engine-generated identifier
    ///
    /// The identifier is derived from the current UTC time
    /// (`announce_YYYYMMDD_HHMMSS`), so two broadcasts issued in the same
    /// second share an identifier and deduplicate against each other.
    pub fn new(body: impl Into<String>, media: Option<PathBuf>) -> Self {
        let id = format!("announce_{}", Utc::now().format("%Y%m%d_%H%M%S"));
        Self {
            id,
            body: body.into(),
            media,
        }
    }

    /// Create an announcement with a caller-supplied identifier
    pub fn with_id(
        id: impl Into<String>,
        body: impl Into<String>,
        media: Option<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
            media,
        }
    }
}

/// Announcement loaded from a JSON file on disk
///
/// Lets operators prepare an announcement (text, optional photo, optional
/// explicit identifier) ahead of time and broadcast it later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementFile {
    /// Message text
    pub message: String,

    /// Optional path to an image sent with the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_path: Option<PathBuf>,

    /// Optional explicit announcement identifier (generated when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_id: Option<String>,
}

impl AnnouncementFile {
    /// Load an announcement description from a JSON file
    pub async fn load(path: &std::path::Path) -> crate::Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write a filled-in example file operators can copy and edit
    pub async fn write_template(path: &std::path::Path) -> crate::Result<()> {
        let template = Self {
            message: "We added new features! Thanks for playing.".to_string(),
            photo_path: Some(PathBuf::from("announcement_image.jpg")),
            announcement_id: Some("update_new_features".to_string()),
        };
        let raw = serde_json::to_string_pretty(&template)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }

    /// Convert into an [`Announcement`], generating an identifier if the file
    /// did not carry one
    pub fn into_announcement(self) -> Announcement {
        match self.announcement_id {
            Some(id) => Announcement::with_id(id, self.message, self.photo_path),
            None => Announcement::new(self.message, self.photo_path),
        }
    }
}

/// Outcome counts for one broadcast run
///
/// Constructed fresh per run and returned to the caller; never persisted.
/// `sent + failed + skipped` may be less than `total` only when the run was
/// cancelled partway through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// Recipients in the snapshot this run operated on
    pub total: u64,
    /// Successful sends
    pub sent: u64,
    /// Failed sends (transport errors, ledger read failures)
    pub failed: u64,
    /// Recipients skipped because the ledger already had a delivery record
    pub skipped: u64,
}

impl DeliveryReport {
    /// Create an empty report for a snapshot of the given size
    pub fn new(total: u64) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Human-readable one-line summary for the operator
    ///
    /// Distinguishes skipped-as-already-delivered from failed so a healthy
    /// re-run does not read like a broken transport.
    pub fn summary(&self) -> String {
        format!(
            "{} recipients: {} sent, {} failed, {} already delivered",
            self.total, self.sent, self.failed, self.skipped
        )
    }
}

/// Event emitted during a broadcast run
///
/// Consumers subscribe through
/// [`Broadcaster::subscribe`](crate::broadcast::Broadcaster::subscribe);
/// events are broadcast to all subscribers independently.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A broadcast run started with a snapshot of this size
    BroadcastStarted {
        /// Announcement identifier
        announcement_id: String,
        /// Recipients in the snapshot
        total: u64,
    },

    /// The announcement was delivered to a recipient
    Delivered {
        /// Announcement identifier
        announcement_id: String,
        /// Recipient that received the message
        recipient: RecipientId,
    },

    /// A send attempt failed; the run continues
    DeliveryFailed {
        /// Announcement identifier
        announcement_id: String,
        /// Recipient the send failed for
        recipient: RecipientId,
        /// Stringified transport (or ledger read) error
        error: String,
    },

    /// A recipient was skipped because the ledger already had a record
    DeliverySkipped {
        /// Announcement identifier
        announcement_id: String,
        /// Recipient that was skipped
        recipient: RecipientId,
    },

    /// The run finished (or was cancelled) with these final counts
    BroadcastFinished {
        /// Announcement identifier
        announcement_id: String,
        /// Final counts
        report: DeliveryReport,
    },
}
