use crate::db::Database;
use crate::ledger::DeliveryLedger;
use crate::types::RecipientId;
use std::sync::Arc;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_mark_and_check_delivery() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let recipient = RecipientId::new(1);
    assert!(!db.has_delivered("promo1", recipient).await.unwrap());

    db.mark_delivered("promo1", recipient).await.unwrap();
    assert!(db.has_delivered("promo1", recipient).await.unwrap());

    db.close().await;
}

#[tokio::test]
async fn test_mark_delivered_is_idempotent() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let recipient = RecipientId::new(1);

    // Marking the same pair twice leaves exactly one record
    db.mark_delivered("promo1", recipient).await.unwrap();
    db.mark_delivered("promo1", recipient).await.unwrap();

    assert!(db.has_delivered("promo1", recipient).await.unwrap());
    assert_eq!(db.delivered_count("promo1").await.unwrap(), 1);

    let records = db.deliveries_for("promo1").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].recipient_id, recipient);
    assert_eq!(records[0].announcement_id, "promo1");

    db.close().await;
}

#[tokio::test]
async fn test_pairs_are_independent() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    db.mark_delivered("promo1", RecipientId::new(1))
        .await
        .unwrap();

    // Same announcement, different recipient
    assert!(
        !db.has_delivered("promo1", RecipientId::new(2))
            .await
            .unwrap()
    );
    // Same recipient, different announcement
    assert!(
        !db.has_delivered("promo2", RecipientId::new(1))
            .await
            .unwrap()
    );

    db.mark_delivered("promo1", RecipientId::new(2))
        .await
        .unwrap();
    db.mark_delivered("promo2", RecipientId::new(1))
        .await
        .unwrap();

    assert_eq!(db.delivered_count("promo1").await.unwrap(), 2);
    assert_eq!(db.delivered_count("promo2").await.unwrap(), 1);

    db.close().await;
}

#[tokio::test]
async fn test_has_delivered_is_side_effect_free() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    let recipient = RecipientId::new(1);
    for _ in 0..5 {
        assert!(!db.has_delivered("promo1", recipient).await.unwrap());
    }
    assert_eq!(db.delivered_count("promo1").await.unwrap(), 0);

    db.close().await;
}

#[tokio::test]
async fn test_concurrent_marks_leave_one_record() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Arc::new(Database::new(temp_file.path()).await.unwrap());

    let recipient = RecipientId::new(1);

    // Two runs of the same announcement racing on the same recipient:
    // the unique key makes the second insert a no-op, not an error
    let mut handles = vec![];
    for _ in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            db.mark_delivered("promo1", recipient).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(db.delivered_count("promo1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_deliveries_for_returns_audit_trail() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = Database::new(temp_file.path()).await.unwrap();

    for id in [1, 2, 3] {
        db.mark_delivered("promo1", RecipientId::new(id))
            .await
            .unwrap();
    }
    db.mark_delivered("other", RecipientId::new(9))
        .await
        .unwrap();

    let records = db.deliveries_for("promo1").await.unwrap();
    assert_eq!(records.len(), 3);
    let recipients: Vec<_> = records.iter().map(|r| r.recipient_id).collect();
    assert_eq!(
        recipients,
        vec![
            RecipientId::new(1),
            RecipientId::new(2),
            RecipientId::new(3)
        ]
    );
    assert!(records.iter().all(|r| r.delivered_at > 0));

    db.close().await;
}
