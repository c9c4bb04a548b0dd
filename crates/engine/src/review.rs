use beacon_database::Database;
use beacon_models::v0::{Report, ReportStatus};
use beacon_result::{create_error, Result};
use iso8601_timestamp::Timestamp;

/// Reject transitions out of a terminal status
///
/// `pending → {reviewing, actioned, dismissed}` and
/// `reviewing → {actioned, dismissed}` are the only legal moves.
fn ensure_open(report: &Report) -> Result<()> {
    if report.is_closed() {
        Err(create_error!(InvalidOperation))
    } else {
        Ok(())
    }
}

/// Move a pending report into review
pub async fn start_review(db: &Database, report_id: &str, reviewer_id: &str) -> Result<Report> {
    let mut report = db.fetch_report(report_id).await?;
    ensure_open(&report)?;

    report.status = ReportStatus::Reviewing {
        reviewed_by: reviewer_id.to_string(),
    };
    db.update_report(&report).await?;
    Ok(report)
}

/// Action a report and close it
///
/// The report stops counting towards escalation immediately, but
/// any alert it contributed to stays up until a reviewer
/// acknowledges it separately.
pub async fn action(
    db: &Database,
    report_id: &str,
    reviewer_id: &str,
    action_taken: &str,
    notes: Option<String>,
) -> Result<Report> {
    let mut report = db.fetch_report(report_id).await?;
    ensure_open(&report)?;

    report.status = ReportStatus::Actioned {
        reviewed_by: reviewer_id.to_string(),
        reviewed_at: Timestamp::now_utc(),
        action_taken: action_taken.to_string(),
    };
    if let Some(notes) = notes {
        report.notes = notes;
    }
    db.update_report(&report).await?;
    Ok(report)
}

/// Dismiss a report without action
pub async fn dismiss(
    db: &Database,
    report_id: &str,
    reviewer_id: &str,
    reason: &str,
) -> Result<Report> {
    let mut report = db.fetch_report(report_id).await?;
    ensure_open(&report)?;

    report.status = ReportStatus::Dismissed {
        reviewed_by: reviewer_id.to_string(),
        reviewed_at: Timestamp::now_utc(),
        reason: reason.to_string(),
    };
    db.update_report(&report).await?;
    Ok(report)
}
