use iso8601_timestamp::Timestamp;

auto_derived!(
    /// User-generated moderation report against a target
    pub struct Report {
        /// Unique Id
        #[serde(rename = "_id")]
        pub id: String,
        /// Id of the content being reported
        pub target_id: String,
        /// Id of the user creating this report
        pub author_id: String,
        /// Violation category selected by the reporter
        pub report_type: ReportType,
        /// Additional report context
        #[serde(skip_serializing_if = "String::is_empty", default)]
        pub description: String,
        /// When the report was submitted
        pub timestamp: Timestamp,
        /// Status of the report
        #[serde(flatten)]
        pub status: ReportStatus,
        /// Additional notes included on the report
        #[serde(default)]
        pub notes: String,
    }

    /// Violation category
    ///
    /// Variant order is the canonical tie-break order when picking
    /// a dominant type across a target's pending reports.
    #[derive(PartialOrd, Ord, Hash, Copy)]
    #[serde(rename_all = "snake_case")]
    pub enum ReportType {
        /// Direct attack against another person
        PersonalAttack,

        /// Defamatory statements
        Defamation,

        /// Sustained harassment or abuse
        Harassment,

        /// Disclosure of private information
        PrivacyViolation,

        /// Content inappropriate for the platform
        InappropriateContent,

        /// Unsolicited advertisements or platform abuse
        Spam,

        /// Anything else
        Other,
    }

    /// Status of the report
    #[serde(tag = "status", rename_all = "snake_case")]
    pub enum ReportStatus {
        /// Report is waiting for triage
        Pending {},

        /// Report is being looked at by a reviewer
        Reviewing { reviewed_by: String },

        /// Report was actioned and resolved
        Actioned {
            reviewed_by: String,
            reviewed_at: Timestamp,
            action_taken: String,
        },

        /// Report was dismissed without action
        Dismissed {
            reviewed_by: String,
            reviewed_at: Timestamp,
            reason: String,
        },
    }

    /// Just the status of the report
    #[derive(PartialOrd, Ord, Hash, Copy)]
    #[serde(rename_all = "snake_case")]
    pub enum ReportStatusString {
        Pending,
        Reviewing,
        Actioned,
        Dismissed,
    }
);

impl ReportType {
    /// All categories in canonical order
    pub const ALL: [ReportType; 7] = [
        ReportType::PersonalAttack,
        ReportType::Defamation,
        ReportType::Harassment,
        ReportType::PrivacyViolation,
        ReportType::InappropriateContent,
        ReportType::Spam,
        ReportType::Other,
    ];
}

impl Report {
    /// Whether this report still counts towards escalation
    pub fn is_pending(&self) -> bool {
        matches!(self.status, ReportStatus::Pending {})
    }

    /// Whether this report has reached a terminal status
    pub fn is_closed(&self) -> bool {
        matches!(
            self.status,
            ReportStatus::Actioned { .. } | ReportStatus::Dismissed { .. }
        )
    }

    /// Status without its associated data
    pub fn status_string(&self) -> ReportStatusString {
        match self.status {
            ReportStatus::Pending {} => ReportStatusString::Pending,
            ReportStatus::Reviewing { .. } => ReportStatusString::Reviewing,
            ReportStatus::Actioned { .. } => ReportStatusString::Actioned,
            ReportStatus::Dismissed { .. } => ReportStatusString::Dismissed,
        }
    }
}
