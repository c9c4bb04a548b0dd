use iso8601_timestamp::Timestamp;

use crate::v0::ReportType;

auto_derived!(
    /// Live escalation alert for a target
    ///
    /// At most one alert exists per target; qualifying reports
    /// overwrite it in place rather than raising a second one.
    pub struct Alert {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the content this alert escalates
        pub target_id: String,
        /// Current severity tier
        pub severity: Severity,
        /// Number of pending reports at the time of the last update
        pub report_count: usize,
        /// Most common violation category among pending reports
        pub dominant_type: ReportType,
        /// Human-readable alert message
        pub message: String,
        /// When the alert was last raised or updated
        pub timestamp: Timestamp,
        /// Id of the reviewer who acknowledged this alert
        #[serde(skip_serializing_if = "Option::is_none")]
        pub acknowledged_by: Option<String>,
        /// When the alert was acknowledged
        #[serde(skip_serializing_if = "Option::is_none")]
        pub acknowledged_at: Option<Timestamp>,
    }

    /// Escalation tier derived from the pending report count
    ///
    /// Ordering is by urgency, `Low < Medium < High < Critical`.
    #[derive(PartialOrd, Ord, Hash, Copy)]
    #[serde(rename_all = "snake_case")]
    pub enum Severity {
        Low,
        Medium,
        High,
        Critical,
    }
);

impl Alert {
    /// Whether a reviewer has acknowledged this alert
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged_by.is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::v0::Severity;

    #[test]
    fn severity_orders_by_urgency() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }
}
