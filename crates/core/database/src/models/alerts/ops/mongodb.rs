use futures::StreamExt;
use mongodb::bson::{doc, to_bson};

use beacon_models::v0::Alert;
use beacon_result::Result;
use iso8601_timestamp::Timestamp;

use crate::MongoDb;

use super::AbstractAlerts;

static COL: &str = "alerts";

#[async_trait]
impl AbstractAlerts for MongoDb {
    /// Create or overwrite the live alert for a target
    async fn upsert_alert(&self, alert: &Alert) -> Result<()> {
        self.col::<Alert>(COL)
            .replace_one(doc! { "target_id": &alert.target_id }, alert)
            .upsert(true)
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("replace_one", COL))
    }

    /// Fetch a target's live alert, if any
    async fn fetch_alert_by_target(&self, target_id: &str) -> Result<Option<Alert>> {
        self.col::<Alert>(COL)
            .find_one(doc! { "target_id": target_id })
            .await
            .map_err(|_| create_database_error!("find_one", COL))
    }

    /// Fetch every alert no reviewer has acknowledged yet
    async fn fetch_unacknowledged_alerts(&self) -> Result<Vec<Alert>> {
        Ok(self
            .col::<Alert>(COL)
            .find(doc! { "acknowledged_by": null })
            .await
            .map_err(|_| create_database_error!("find", COL))?
            .filter_map(|s| async {
                if cfg!(debug_assertions) {
                    Some(s.unwrap())
                } else {
                    s.ok()
                }
            })
            .collect()
            .await)
    }

    /// Mark a target's alert as acknowledged
    async fn acknowledge_alert(
        &self,
        target_id: &str,
        user_id: &str,
        at: Timestamp,
    ) -> Result<()> {
        // filtering on a null acknowledgement keeps this idempotent
        let result = self
            .col::<Alert>(COL)
            .update_one(
                doc! { "target_id": target_id, "acknowledged_by": null },
                doc! {
                    "$set": {
                        "acknowledged_by": user_id,
                        "acknowledged_at": to_bson(&at)
                            .map_err(|_| create_database_error!("to_bson", COL))?,
                    }
                },
            )
            .await
            .map_err(|_| create_database_error!("update_one", COL))?;

        // an unmatched update is fine if the alert is already
        // acknowledged, but a missing alert is an error
        if result.matched_count == 0 && self.fetch_alert_by_target(target_id).await?.is_none() {
            return Err(create_error!(NotFound));
        }

        Ok(())
    }
}
