use iso8601_timestamp::Timestamp;

use crate::v0::Severity;

auto_derived!(
    /// Record of one alert being fanned out to reviewers
    pub struct NotificationRecord {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Severity tier of the alert at dispatch time
        pub severity: Severity,
        /// Id of the content the alert refers to
        pub target_id: String,
        /// Pending report count carried in the alert
        pub report_count: usize,
        /// Message delivered to reviewers
        pub message: String,
        /// Ids of the resolved audience
        pub target_user_ids: Vec<String>,
        /// Delivery priority
        pub priority: Priority,
        /// When the record was created
        pub created_at: Timestamp,
        /// Stamped once every channel attempt has completed or timed out
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sent_at: Option<Timestamp>,
        /// Per-channel outcome, appended as each attempt finishes
        #[serde(default)]
        pub results: Vec<DispatchResult>,
    }

    /// Delivery priority attached to a notification
    #[derive(PartialOrd, Ord, Hash, Copy)]
    #[serde(rename_all = "snake_case")]
    pub enum Priority {
        Low,
        Medium,
        High,
        Urgent,
    }

    /// A notification channel reviewers can be reached through
    #[derive(PartialOrd, Ord, Hash, Copy)]
    #[serde(rename_all = "snake_case")]
    pub enum Channel {
        Dashboard,
        Email,
        Push,
        Sms,
    }

    /// Outcome of one channel's delivery attempt
    pub struct DispatchResult {
        /// Channel the attempt went through
        pub channel: Channel,
        /// Whether delivery succeeded
        pub success: bool,
        /// Failure detail, if any
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
    }
);

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Channel::Dashboard => "dashboard",
            Channel::Email => "email",
            Channel::Push => "push",
            Channel::Sms => "sms",
        })
    }
}
