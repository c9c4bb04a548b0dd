use beacon_models::v0::{DispatchResult, NotificationRecord};
use beacon_result::Result;
use iso8601_timestamp::Timestamp;

use crate::ReferenceDb;

use super::AbstractNotifications;

#[async_trait]
impl AbstractNotifications for ReferenceDb {
    /// Insert a new notification record into the database
    async fn insert_notification(&self, record: &NotificationRecord) -> Result<()> {
        let mut notifications = self.notifications.lock().await;
        if notifications.contains_key(&record.id) {
            Err(create_database_error!("insert", "notifications"))
        } else {
            notifications.insert(record.id.to_string(), record.clone());
            Ok(())
        }
    }

    /// Append one channel's outcome to a notification record
    async fn append_dispatch_result(&self, id: &str, result: &DispatchResult) -> Result<()> {
        let mut notifications = self.notifications.lock().await;
        if let Some(record) = notifications.get_mut(id) {
            record.results.push(result.clone());
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Stamp a notification once every channel attempt has finished
    async fn mark_notification_sent(&self, id: &str, at: Timestamp) -> Result<()> {
        let mut notifications = self.notifications.lock().await;
        if let Some(record) = notifications.get_mut(id) {
            record.sent_at = Some(at);
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Fetch a notification record by its id
    async fn fetch_notification(&self, id: &str) -> Result<NotificationRecord> {
        let notifications = self.notifications.lock().await;
        notifications
            .get(id)
            .cloned()
            .ok_or_else(|| create_error!(NotFound))
    }
}
