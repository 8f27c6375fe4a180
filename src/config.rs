//! Configuration types for quiz-broadcast

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Main configuration for [`Broadcaster`](crate::broadcast::Broadcaster)
///
/// All fields have serde defaults, so a deployment can configure only what
/// it cares about (or use `Config::default()` unchanged).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite database file (default: "./quizbot.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Minimum delay between consecutive outbound sends (default: 100 ms)
    ///
    /// Keeps a run under the platform's outbound-message-rate ceiling.
    /// Skipped recipients do not pay this delay.
    #[serde(default = "default_send_pacing", with = "duration_millis_serde")]
    pub send_pacing: Duration,

    /// Event broadcast channel capacity (default: 256)
    ///
    /// A subscriber that falls this many events behind starts receiving
    /// `RecvError::Lagged`.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// What a run does when a ledger read fails (default: count as failure)
    #[serde(default)]
    pub read_error_policy: ReadErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            send_pacing: default_send_pacing(),
            event_buffer: default_event_buffer(),
            read_error_policy: ReadErrorPolicy::default(),
        }
    }
}

/// Policy applied when the ledger cannot be read for a recipient
///
/// Guessing silently is not an option: treating a read error as "not yet
/// delivered" risks a duplicate send, so the choice is explicit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadErrorPolicy {
    /// Count the recipient as failed and never send (no duplicate risk)
    #[default]
    FailRecipient,

    /// Proceed as if undelivered (accepts the duplicate-send risk)
    AssumeUndelivered,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./quizbot.db")
}

fn default_send_pacing() -> Duration {
    Duration::from_millis(100)
}

fn default_event_buffer() -> usize {
    256
}

mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
