use crate::db::Database;
use crate::recipients::RecipientSource;
use crate::types::RecipientId;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_register_recipient() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let newly = db.register_recipient(RecipientId::new(100)).await.unwrap();
    assert!(newly, "first registration should report a new recipient");

    let recipient = db
        .get_recipient(RecipientId::new(100))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recipient.id, RecipientId::new(100));
    assert!(recipient.registered_at > 0);

    db.close().await;
}

#[tokio::test]
async fn test_register_recipient_is_idempotent() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    assert!(db.register_recipient(RecipientId::new(100)).await.unwrap());
    let original = db
        .get_recipient(RecipientId::new(100))
        .await
        .unwrap()
        .unwrap();

    // Second registration: no-op, original timestamp preserved
    let newly = db.register_recipient(RecipientId::new(100)).await.unwrap();
    assert!(!newly, "re-registration should not report a new recipient");

    let after = db
        .get_recipient(RecipientId::new(100))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.registered_at, original.registered_at);
    assert_eq!(db.recipient_count().await.unwrap(), 1);

    db.close().await;
}

#[tokio::test]
async fn test_list_recipients_orders_by_registration_then_id() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    // Controlled timestamps: 30 and 20 registered in the same second
    // (id tie-breaker applies), 10 registered later
    for (id, registered_at) in [(30_i64, 100_i64), (10, 300), (20, 100)] {
        sqlx::query("INSERT INTO recipients (id, registered_at) VALUES (?, ?)")
            .bind(id)
            .bind(registered_at)
            .execute(db.pool())
            .await
            .unwrap();
    }

    let snapshot = db.list_recipients().await.unwrap();
    assert_eq!(
        snapshot,
        vec![
            RecipientId::new(20),
            RecipientId::new(30),
            RecipientId::new(10)
        ]
    );

    db.close().await;
}

#[tokio::test]
async fn test_list_recipients_empty() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    assert!(db.list_recipients().await.unwrap().is_empty());
    assert_eq!(db.recipient_count().await.unwrap(), 0);

    db.close().await;
}

#[tokio::test]
async fn test_get_recipient_missing_returns_none() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    assert!(
        db.get_recipient(RecipientId::new(999))
            .await
            .unwrap()
            .is_none()
    );

    db.close().await;
}
