use beacon_models::v0::Report;
use beacon_result::Result;

use crate::ReferenceDb;

use super::AbstractReports;

#[async_trait]
impl AbstractReports for ReferenceDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if reports.contains_key(&report.id) {
            Err(create_database_error!("insert", "reports"))
        } else {
            reports.insert(report.id.to_string(), report.clone());
            Ok(())
        }
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        let reports = self.reports.lock().await;
        reports.get(id).cloned().ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all reports made against a target
    async fn fetch_reports_by_target(&self, target_id: &str) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        Ok(reports
            .values()
            .filter(|report| report.target_id == target_id)
            .cloned()
            .collect())
    }

    /// Fetch reports against a target which are still pending
    async fn fetch_pending_reports_by_target(&self, target_id: &str) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        Ok(reports
            .values()
            .filter(|report| report.target_id == target_id && report.is_pending())
            .cloned()
            .collect())
    }

    /// Whether the given author already has a pending report against the target
    async fn has_pending_report(&self, target_id: &str, author_id: &str) -> Result<bool> {
        let reports = self.reports.lock().await;
        Ok(reports.values().any(|report| {
            report.target_id == target_id
                && report.author_id == author_id
                && report.is_pending()
        }))
    }

    /// Replace an existing report with new information
    async fn update_report(&self, report: &Report) -> Result<()> {
        let mut reports = self.reports.lock().await;
        if let Some(entry) = reports.get_mut(&report.id) {
            *entry = report.clone();
            Ok(())
        } else {
            Err(create_error!(NotFound))
        }
    }

    /// Fetch every report ever made
    async fn fetch_all_reports(&self) -> Result<Vec<Report>> {
        let reports = self.reports.lock().await;
        Ok(reports.values().cloned().collect())
    }
}
