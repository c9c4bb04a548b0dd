use beacon_models::v0::Report;
use beacon_result::Result;

#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

#[async_trait]
pub trait AbstractReports: Sync + Send {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()>;

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report>;

    /// Fetch all reports made against a target
    async fn fetch_reports_by_target(&self, target_id: &str) -> Result<Vec<Report>>;

    /// Fetch reports against a target which are still pending
    async fn fetch_pending_reports_by_target(&self, target_id: &str) -> Result<Vec<Report>>;

    /// Whether the given author already has a pending report against the target
    async fn has_pending_report(&self, target_id: &str, author_id: &str) -> Result<bool>;

    /// Replace an existing report with new information
    async fn update_report(&self, report: &Report) -> Result<()>;

    /// Fetch every report ever made
    async fn fetch_all_reports(&self) -> Result<Vec<Report>>;
}
