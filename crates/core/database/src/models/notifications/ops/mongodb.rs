use mongodb::bson::{doc, to_bson};

use beacon_models::v0::{DispatchResult, NotificationRecord};
use beacon_result::Result;
use iso8601_timestamp::Timestamp;

use crate::MongoDb;

use super::AbstractNotifications;

static COL: &str = "notifications";

#[async_trait]
impl AbstractNotifications for MongoDb {
    /// Insert a new notification record into the database
    async fn insert_notification(&self, record: &NotificationRecord) -> Result<()> {
        self.col::<NotificationRecord>(COL)
            .insert_one(record)
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("insert_one", COL))
    }

    /// Append one channel's outcome to a notification record
    async fn append_dispatch_result(&self, id: &str, result: &DispatchResult) -> Result<()> {
        self.col::<NotificationRecord>(COL)
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$push": {
                        "results": to_bson(result)
                            .map_err(|_| create_database_error!("to_bson", COL))?,
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_one", COL))
    }

    /// Stamp a notification once every channel attempt has finished
    async fn mark_notification_sent(&self, id: &str, at: Timestamp) -> Result<()> {
        self.col::<NotificationRecord>(COL)
            .update_one(
                doc! { "_id": id },
                doc! {
                    "$set": {
                        "sent_at": to_bson(&at)
                            .map_err(|_| create_database_error!("to_bson", COL))?,
                    }
                },
            )
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("update_one", COL))
    }

    /// Fetch a notification record by its id
    async fn fetch_notification(&self, id: &str) -> Result<NotificationRecord> {
        self.col::<NotificationRecord>(COL)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|_| create_database_error!("find_one", COL))?
            .ok_or_else(|| create_error!(NotFound))
    }
}
