use beacon_models::v0::Alert;
use beacon_result::Result;
use iso8601_timestamp::Timestamp;

use crate::ReferenceDb;

use super::AbstractAlerts;

#[async_trait]
impl AbstractAlerts for ReferenceDb {
    /// Create or overwrite the live alert for a target
    async fn upsert_alert(&self, alert: &Alert) -> Result<()> {
        let mut alerts = self.alerts.lock().await;
        alerts.insert(alert.target_id.to_string(), alert.clone());
        Ok(())
    }

    /// Fetch a target's live alert, if any
    async fn fetch_alert_by_target(&self, target_id: &str) -> Result<Option<Alert>> {
        let alerts = self.alerts.lock().await;
        Ok(alerts.get(target_id).cloned())
    }

    /// Fetch every alert no reviewer has acknowledged yet
    async fn fetch_unacknowledged_alerts(&self) -> Result<Vec<Alert>> {
        let alerts = self.alerts.lock().await;
        Ok(alerts
            .values()
            .filter(|alert| !alert.is_acknowledged())
            .cloned()
            .collect())
    }

    /// Mark a target's alert as acknowledged
    async fn acknowledge_alert(
        &self,
        target_id: &str,
        user_id: &str,
        at: Timestamp,
    ) -> Result<()> {
        let mut alerts = self.alerts.lock().await;
        if let Some(alert) = alerts.get_mut(target_id) {
            if !alert.is_acknowledged() {
                alert.acknowledged_by = Some(user_id.to_string());
                alert.acknowledged_at = Some(at);
            }
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }
}
