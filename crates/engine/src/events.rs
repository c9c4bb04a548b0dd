use beacon_models::v0::{Report, ReportType, Severity};

/// Emitted by intake once a report has been committed
///
/// Carries the pending set read inside the same critical section as
/// the insert, so downstream stages never evaluate a stale count.
#[derive(Debug, Clone)]
pub struct ReportSubmitted {
    /// The newly created report
    pub report: Report,
    /// All pending reports against the target, the new one included
    pub pending: Vec<Report>,
}

/// Produced by the threshold evaluator when a target crosses a tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    pub target_id: String,
    pub severity: Severity,
    pub report_count: usize,
    pub dominant_type: ReportType,
}
