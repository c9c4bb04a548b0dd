use std::collections::HashMap;

use crate::v0::{Alert, ReportStatusString, ReportType};

auto_derived!(
    /// Current reporting picture for a single target
    pub struct TargetReportSummary {
        /// Id of the target
        pub target_id: String,
        /// Lifetime report count
        pub total: usize,
        /// Reports still counting towards escalation
        pub pending: usize,
        /// Lifetime counts per violation category
        pub by_type: HashMap<ReportType, usize>,
        /// Live alert, if one has been raised
        pub alert: Option<Alert>,
    }

    /// Entry in the most-reported targets ranking
    pub struct TargetOverview {
        /// Id of the target
        pub target_id: String,
        /// Lifetime report count
        pub total_reports: usize,
        /// Rolled-up status across the target's reports
        pub status: ReportStatusString,
    }
);

/// Read-side rollup across all reports
///
/// Informational only; computed without locks and allowed to lag
/// behind concurrent writers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "schemas", derive(JsonSchema))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    /// Lifetime report count
    pub total_reports: usize,
    /// Counts per violation category
    pub by_type: HashMap<ReportType, usize>,
    /// Counts per report status
    pub by_status: HashMap<ReportStatusString, usize>,
    /// Reports currently pending
    pub pending: usize,
    /// Mean hours from submission to action, 0 when nothing was actioned
    pub average_response_time_hours: f64,
    /// Up to five targets ranked by lifetime report count
    pub top_reported_targets: Vec<TargetOverview>,
}
