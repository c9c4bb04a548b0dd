use std::collections::HashMap;

use beacon_models::v0::{
    Report, ReportStatus, ReportStatusString, Statistics, TargetOverview,
};

/// Read-side rollup over every report ever made
///
/// Runs without locks; a rollup racing a writer may lag by a
/// report, which is acceptable for an informational view.
pub fn aggregate(reports: &[Report], top_targets: usize) -> Statistics {
    let mut by_type = HashMap::new();
    let mut by_status = HashMap::new();
    let mut pending = 0;

    let mut actioned_hours = 0.0;
    let mut actioned_count = 0usize;

    let mut per_target: HashMap<&str, Vec<&Report>> = HashMap::new();

    for report in reports {
        *by_type.entry(report.report_type).or_default() += 1;
        *by_status.entry(report.status_string()).or_default() += 1;

        if report.is_pending() {
            pending += 1;
        }

        if let ReportStatus::Actioned { reviewed_at, .. } = &report.status {
            actioned_hours +=
                reviewed_at.duration_since(report.timestamp).whole_seconds() as f64 / 3600.0;
            actioned_count += 1;
        }

        per_target
            .entry(report.target_id.as_str())
            .or_default()
            .push(report);
    }

    let mut top_reported_targets: Vec<TargetOverview> = per_target
        .into_iter()
        .map(|(target_id, reports)| TargetOverview {
            target_id: target_id.to_string(),
            total_reports: reports.len(),
            status: rollup_status(&reports),
        })
        .collect();

    // rank by lifetime count, ties by id for a stable ordering
    top_reported_targets.sort_by(|a, b| {
        b.total_reports
            .cmp(&a.total_reports)
            .then_with(|| a.target_id.cmp(&b.target_id))
    });
    top_reported_targets.truncate(top_targets);

    Statistics {
        total_reports: reports.len(),
        by_type,
        by_status,
        pending,
        average_response_time_hours: if actioned_count == 0 {
            0.0
        } else {
            actioned_hours / actioned_count as f64
        },
        top_reported_targets,
    }
}

/// A target is still "pending" while any of its reports is open;
/// otherwise it is actioned if anything was actioned, else dismissed.
fn rollup_status(reports: &[&Report]) -> ReportStatusString {
    if reports.iter().any(|report| !report.is_closed()) {
        ReportStatusString::Pending
    } else if reports
        .iter()
        .any(|report| matches!(report.status, ReportStatus::Actioned { .. }))
    {
        ReportStatusString::Actioned
    } else {
        ReportStatusString::Dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::aggregate;
    use beacon_models::v0::{Report, ReportStatus, ReportStatusString, ReportType};
    use iso8601_timestamp::{Duration, Timestamp};

    fn pending(target_id: &str, report_type: ReportType) -> Report {
        Report {
            id: ulid::Ulid::new().to_string(),
            target_id: target_id.to_string(),
            author_id: "user-1".to_string(),
            report_type,
            description: String::new(),
            timestamp: Timestamp::now_utc(),
            status: ReportStatus::Pending {},
            notes: String::new(),
        }
    }

    fn actioned(target_id: &str, hours_to_review: i64) -> Report {
        let submitted = Timestamp::now_utc();
        Report {
            status: ReportStatus::Actioned {
                reviewed_by: "mod-1".to_string(),
                reviewed_at: submitted + Duration::hours(hours_to_review),
                action_taken: "content removed".to_string(),
            },
            timestamp: submitted,
            ..pending(target_id, ReportType::Spam)
        }
    }

    #[test]
    fn no_actioned_reports_means_zero_response_time() {
        let stats = aggregate(&[pending("post-a", ReportType::Spam)], 5);
        assert_eq!(stats.average_response_time_hours, 0.0);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_reports, 1);
    }

    #[test]
    fn response_time_averages_actioned_reports_only() {
        let reports = vec![
            actioned("post-a", 2),
            actioned("post-a", 4),
            pending("post-b", ReportType::Other),
        ];
        let stats = aggregate(&reports, 5);
        assert!((stats.average_response_time_hours - 3.0).abs() < 0.01);
    }

    #[test]
    fn top_targets_rank_by_lifetime_count() {
        let reports = vec![
            pending("post-a", ReportType::Spam),
            actioned("post-b", 1),
            actioned("post-b", 1),
            pending("post-c", ReportType::Harassment),
            pending("post-c", ReportType::Harassment),
            pending("post-c", ReportType::Spam),
        ];

        let stats = aggregate(&reports, 2);
        assert_eq!(stats.top_reported_targets.len(), 2);
        assert_eq!(stats.top_reported_targets[0].target_id, "post-c");
        assert_eq!(
            stats.top_reported_targets[0].status,
            ReportStatusString::Pending
        );
        assert_eq!(stats.top_reported_targets[1].target_id, "post-b");
        assert_eq!(
            stats.top_reported_targets[1].status,
            ReportStatusString::Actioned
        );

        assert_eq!(stats.by_type[&ReportType::Spam], 4);
        assert_eq!(stats.by_status[&ReportStatusString::Pending], 4);
    }
}
