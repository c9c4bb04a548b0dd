use beacon_models::v0::{DispatchResult, NotificationRecord};
use beacon_result::Result;
use iso8601_timestamp::Timestamp;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractNotifications: Sync + Send {
    /// Insert a new notification record into the database
    async fn insert_notification(&self, record: &NotificationRecord) -> Result<()>;

    /// Append one channel's outcome to a notification record
    ///
    /// Called as each attempt finishes so partial results survive
    /// an interrupted fan-out.
    async fn append_dispatch_result(&self, id: &str, result: &DispatchResult) -> Result<()>;

    /// Stamp a notification once every channel attempt has finished
    async fn mark_notification_sent(&self, id: &str, at: Timestamp) -> Result<()>;

    /// Fetch a notification record by its id
    async fn fetch_notification(&self, id: &str) -> Result<NotificationRecord>;
}

#[cfg(test)]
mod tests {
    use beacon_models::v0::{
        Channel, DispatchResult, NotificationRecord, Priority, Severity,
    };
    use iso8601_timestamp::Timestamp;
    use ulid::Ulid;

    #[async_std::test]
    async fn records_partial_results() {
        database_test!(|db| async move {
            let record = NotificationRecord {
                id: Ulid::new().to_string(),
                severity: Severity::High,
                target_id: "post-a".to_string(),
                report_count: 5,
                message: "5 reports".to_string(),
                target_user_ids: vec!["mod-1".to_string()],
                priority: Priority::High,
                created_at: Timestamp::now_utc(),
                sent_at: None,
                results: vec![],
            };

            db.insert_notification(&record).await.unwrap();

            db.append_dispatch_result(
                &record.id,
                &DispatchResult {
                    channel: Channel::Dashboard,
                    success: true,
                    error: None,
                },
            )
            .await
            .unwrap();

            db.append_dispatch_result(
                &record.id,
                &DispatchResult {
                    channel: Channel::Email,
                    success: false,
                    error: Some("timed out".to_string()),
                },
            )
            .await
            .unwrap();

            db.mark_notification_sent(&record.id, Timestamp::now_utc())
                .await
                .unwrap();

            let stored = db.fetch_notification(&record.id).await.unwrap();
            assert_eq!(stored.results.len(), 2);
            assert!(stored.sent_at.is_some());
        });
    }
}
