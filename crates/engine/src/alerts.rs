use beacon_database::Database;
use beacon_models::v0::{Alert, Severity};
use beacon_result::Result;
use iso8601_timestamp::Timestamp;
use ulid::Ulid;

use crate::events::Escalation;

/// Fixed message template per severity tier
pub fn generate_message(severity: Severity, count: usize) -> String {
    match severity {
        Severity::Low => format!("📌 Notice: {count} reports received"),
        Severity::Medium => format!("⚠️ Warning: {count} reports received"),
        Severity::High => format!("🚨 Alert: {count} reports received, review required"),
        Severity::Critical => format!("🚨 Critical: {count} reports, immediate action required"),
    }
}

/// Merge an escalation into the target's live alert
///
/// Overwrites the existing alert in place, acknowledgement
/// included; a fresh spike on an already-acknowledged alert makes
/// it actionable again. Creates the alert if none exists.
pub async fn upsert(db: &Database, escalation: &Escalation) -> Result<Alert> {
    let existing = db.fetch_alert_by_target(&escalation.target_id).await?;

    let alert = Alert {
        id: existing
            .map(|alert| alert.id)
            .unwrap_or_else(|| Ulid::new().to_string()),
        target_id: escalation.target_id.to_string(),
        severity: escalation.severity,
        report_count: escalation.report_count,
        dominant_type: escalation.dominant_type,
        message: generate_message(escalation.severity, escalation.report_count),
        timestamp: Timestamp::now_utc(),
        acknowledged_by: None,
        acknowledged_at: None,
    };

    db.upsert_alert(&alert).await?;
    Ok(alert)
}

/// Acknowledge a target's alert, idempotently
pub async fn acknowledge(db: &Database, target_id: &str, user_id: &str) -> Result<()> {
    db.acknowledge_alert(target_id, user_id, Timestamp::now_utc())
        .await
}

/// All unacknowledged alerts, most urgent first
///
/// Equal severities are ordered oldest first so long-standing
/// alerts surface ahead of fresh ones.
pub async fn list_unacknowledged(db: &Database) -> Result<Vec<Alert>> {
    let mut alerts = db.fetch_unacknowledged_alerts().await?;
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });
    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::generate_message;
    use beacon_models::v0::Severity;

    #[test]
    fn messages_follow_tier_templates() {
        assert_eq!(
            generate_message(Severity::Low, 1),
            "📌 Notice: 1 reports received"
        );
        assert_eq!(
            generate_message(Severity::Critical, 10),
            "🚨 Critical: 10 reports, immediate action required"
        );
    }
}
