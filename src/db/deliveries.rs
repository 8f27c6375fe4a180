//! Delivery ledger queries.
//!
//! The deliveries table is append-only: rows are inserted when a send
//! succeeds and never updated or deleted. The UNIQUE(announcement_id,
//! recipient_id) constraint plus `INSERT OR IGNORE` gives the atomic
//! insert-if-absent the engine's idempotency rests on.

use crate::error::DatabaseError;
use crate::ledger::DeliveryLedger;
use crate::types::RecipientId;
use crate::{Error, Result};
use async_trait::async_trait;

use super::{Database, DeliveryRecord};

impl Database {
    /// Count delivery records for one announcement
    pub async fn delivered_count(&self, announcement_id: &str) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM deliveries WHERE announcement_id = ?")
                .bind(announcement_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    Error::Database(DatabaseError::QueryFailed(format!(
                        "Failed to count deliveries: {}",
                        e
                    )))
                })?;

        Ok(count as u64)
    }

    /// Fetch the audit trail for one announcement, oldest first
    pub async fn deliveries_for(&self, announcement_id: &str) -> Result<Vec<DeliveryRecord>> {
        let rows = sqlx::query_as::<_, DeliveryRecord>(
            r#"
            SELECT announcement_id, recipient_id, delivered_at
            FROM deliveries
            WHERE announcement_id = ?
            ORDER BY delivered_at, recipient_id
            "#,
        )
        .bind(announcement_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to fetch deliveries: {}",
                e
            )))
        })?;

        Ok(rows)
    }
}

#[async_trait]
impl DeliveryLedger for Database {
    async fn has_delivered(&self, announcement_id: &str, recipient: RecipientId) -> Result<bool> {
        let row: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM deliveries
            WHERE announcement_id = ? AND recipient_id = ?
            "#,
        )
        .bind(announcement_id)
        .bind(recipient)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to check delivery record: {}",
                e
            )))
        })?;

        Ok(row.is_some())
    }

    async fn mark_delivered(&self, announcement_id: &str, recipient: RecipientId) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO deliveries (announcement_id, recipient_id, delivered_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(announcement_id)
        .bind(recipient)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Error::Database(DatabaseError::QueryFailed(format!(
                "Failed to record delivery: {}",
                e
            )))
        })?;

        Ok(())
    }
}
