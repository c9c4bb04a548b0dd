use serde::Deserialize;
use validator::Validate;

use beacon_database::Database;
use beacon_models::v0::{Report, ReportStatus, ReportType};
use beacon_result::{create_error, Result};
use iso8601_timestamp::Timestamp;
use ulid::Ulid;

use crate::events::ReportSubmitted;

/// # Report Data
#[derive(Validate, Deserialize, Debug, Clone)]
pub struct DataSubmitReport {
    /// Violation category
    pub report_type: ReportType,
    /// Additional report description
    #[validate(length(min = 0, max = 500))]
    #[serde(default)]
    pub description: String,
}

/// Validate and commit a new report
///
/// Must be called with the target's lock held: the pending set it
/// returns is what the threshold evaluator runs on, and it has to
/// reflect the store at the moment of commit.
pub async fn submit(
    db: &Database,
    target_id: &str,
    author_id: &str,
    data: DataSubmitReport,
) -> Result<ReportSubmitted> {
    data.validate()
        .map_err(|error| create_error!(FailedValidation {
            error: error.to_string()
        }))?;

    if db.has_pending_report(target_id, author_id).await? {
        return Err(create_error!(DuplicateReport));
    }

    let report = Report {
        id: Ulid::new().to_string(),
        target_id: target_id.to_string(),
        author_id: author_id.to_string(),
        report_type: data.report_type,
        description: data.description,
        timestamp: Timestamp::now_utc(),
        status: ReportStatus::Pending {},
        notes: String::new(),
    };

    if let Err(error) = db.insert_report(&report).await {
        // The insert is the one durable write on the submission
        // path; a store failure here degrades to in-memory rather
        // than rejecting the reporter.
        if !matches!(
            error.error_type,
            beacon_result::ErrorType::DatabaseError { .. }
        ) {
            return Err(error);
        }

        db.degrade("insert_report failed");
        db.insert_report(&report).await?;
    }

    let pending = db.fetch_pending_reports_by_target(target_id).await?;

    Ok(ReportSubmitted { report, pending })
}

#[cfg(test)]
mod tests {
    use super::DataSubmitReport;
    use beacon_models::v0::ReportType;
    use validator::Validate;

    #[test]
    fn description_length_is_limited() {
        let data = DataSubmitReport {
            report_type: ReportType::Spam,
            description: "a".repeat(501),
        };
        assert!(data.validate().is_err());

        let data = DataSubmitReport {
            report_type: ReportType::Spam,
            description: "a".repeat(500),
        };
        assert!(data.validate().is_ok());
    }

    #[test]
    fn unknown_report_type_does_not_deserialize() {
        assert!(serde_json::from_str::<DataSubmitReport>(
            r#"{ "report_type": "telepathy" }"#
        )
        .is_err());
        assert!(serde_json::from_str::<DataSubmitReport>(
            r#"{ "report_type": "privacy_violation" }"#
        )
        .is_ok());
    }
}
