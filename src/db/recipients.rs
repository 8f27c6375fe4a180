//! Recipient registration and snapshot queries.

use crate::error::DatabaseError;
use crate::recipients::RecipientSource;
use crate::types::RecipientId;
use crate::{Error, Result};
use async_trait::async_trait;

use super::{Database, Recipient};

impl Database {
    /// Register a recipient on first contact
    ///
    /// Idempotent: re-registering an existing recipient is a no-op that keeps
    /// the original registration timestamp. Returns true if the recipient was
    /// newly registered.
    pub async fn register_recipient(&self, recipient: RecipientId) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO recipients (id, registered_at)
            VALUES (?, ?)
            "#,
        )
        .bind(recipient)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to register recipient: {}",
                e
            )))
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch a single recipient record
    pub async fn get_recipient(&self, recipient: RecipientId) -> Result<Option<Recipient>> {
        let row = sqlx::query_as::<_, Recipient>(
            r#"
            SELECT id, registered_at FROM recipients WHERE id = ?
            "#,
        )
        .bind(recipient)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to fetch recipient: {}",
                e
            )))
        })?;

        Ok(row)
    }

    /// Count registered recipients
    pub async fn recipient_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                Error::Database(DatabaseError::QueryFailed(format!(
                    "Failed to count recipients: {}",
                    e
                )))
            })?;

        Ok(count as u64)
    }
}

#[async_trait]
impl RecipientSource for Database {
    /// Snapshot all recipients in registration order
    ///
    /// Registration order (with id as tie-breaker) keeps the broadcast
    /// processing order deterministic across runs.
    async fn list_recipients(&self) -> Result<Vec<RecipientId>> {
        let ids = sqlx::query_scalar::<_, RecipientId>(
            r#"
            SELECT id FROM recipients ORDER BY registered_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to list recipients: {}",
                e
            )))
        })?;

        Ok(ids)
    }
}
