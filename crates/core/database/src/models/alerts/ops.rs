use beacon_models::v0::Alert;
use beacon_result::Result;
use iso8601_timestamp::Timestamp;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractAlerts: Sync + Send {
    /// Create or overwrite the live alert for a target
    async fn upsert_alert(&self, alert: &Alert) -> Result<()>;

    /// Fetch a target's live alert, if any
    async fn fetch_alert_by_target(&self, target_id: &str) -> Result<Option<Alert>>;

    /// Fetch every alert no reviewer has acknowledged yet
    async fn fetch_unacknowledged_alerts(&self) -> Result<Vec<Alert>>;

    /// Mark a target's alert as acknowledged
    ///
    /// A no-op when the alert is already acknowledged.
    async fn acknowledge_alert(&self, target_id: &str, user_id: &str, at: Timestamp)
        -> Result<()>;
}

#[cfg(test)]
mod tests {
    use beacon_models::v0::{Alert, ReportType, Severity};
    use iso8601_timestamp::Timestamp;
    use ulid::Ulid;

    fn alert(target_id: &str, severity: Severity, report_count: usize) -> Alert {
        Alert {
            id: Ulid::new().to_string(),
            target_id: target_id.to_string(),
            severity,
            report_count,
            dominant_type: ReportType::Spam,
            message: format!("{report_count} reports"),
            timestamp: Timestamp::now_utc(),
            acknowledged_by: None,
            acknowledged_at: None,
        }
    }

    #[async_std::test]
    async fn upsert_and_acknowledge() {
        database_test!(|db| async move {
            let initial = alert("post-a", Severity::Low, 1);
            db.upsert_alert(&initial).await.unwrap();

            // overwrite in place, same target
            let escalated = Alert {
                severity: Severity::High,
                report_count: 5,
                ..initial.clone()
            };
            db.upsert_alert(&escalated).await.unwrap();

            let live = db
                .fetch_alert_by_target("post-a")
                .await
                .unwrap()
                .expect("alert should exist");
            assert_eq!(live.severity, Severity::High);
            assert_eq!(db.fetch_unacknowledged_alerts().await.unwrap().len(), 1);

            db.acknowledge_alert("post-a", "mod-1", Timestamp::now_utc())
                .await
                .unwrap();

            // acknowledging twice is a no-op, not an error
            db.acknowledge_alert("post-a", "mod-2", Timestamp::now_utc())
                .await
                .unwrap();

            let live = db
                .fetch_alert_by_target("post-a")
                .await
                .unwrap()
                .expect("alert should exist");
            assert_eq!(live.acknowledged_by.as_deref(), Some("mod-1"));
            assert!(db.fetch_unacknowledged_alerts().await.unwrap().is_empty());

            // a target with no alert cannot be acknowledged
            assert!(db
                .acknowledge_alert("post-missing", "mod-1", Timestamp::now_utc())
                .await
                .is_err());
        });
    }
}
