use futures::StreamExt;
use mongodb::bson::doc;

use beacon_models::v0::Report;
use beacon_result::Result;

use crate::MongoDb;

use super::AbstractReports;

static COL: &str = "reports";

impl MongoDb {
    async fn find_reports(&self, filter: mongodb::bson::Document) -> Result<Vec<Report>> {
        Ok(self
            .col::<Report>(COL)
            .find(filter)
            .await
            .map_err(|_| create_database_error!("find", COL))?
            .filter_map(|s| async {
                if cfg!(debug_assertions) {
                    Some(s.unwrap())
                } else {
                    s.ok()
                }
            })
            .collect()
            .await)
    }
}

#[async_trait]
impl AbstractReports for MongoDb {
    /// Insert a new report into the database
    async fn insert_report(&self, report: &Report) -> Result<()> {
        self.col::<Report>(COL)
            .insert_one(report)
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("insert_one", COL))
    }

    /// Fetch a report by its id
    async fn fetch_report(&self, id: &str) -> Result<Report> {
        self.col::<Report>(COL)
            .find_one(doc! { "_id": id })
            .await
            .map_err(|_| create_database_error!("find_one", COL))?
            .ok_or_else(|| create_error!(NotFound))
    }

    /// Fetch all reports made against a target
    async fn fetch_reports_by_target(&self, target_id: &str) -> Result<Vec<Report>> {
        self.find_reports(doc! { "target_id": target_id }).await
    }

    /// Fetch reports against a target which are still pending
    async fn fetch_pending_reports_by_target(&self, target_id: &str) -> Result<Vec<Report>> {
        self.find_reports(doc! { "target_id": target_id, "status": "pending" })
            .await
    }

    /// Whether the given author already has a pending report against the target
    async fn has_pending_report(&self, target_id: &str, author_id: &str) -> Result<bool> {
        self.col::<Report>(COL)
            .count_documents(doc! {
                "target_id": target_id,
                "author_id": author_id,
                "status": "pending"
            })
            .await
            .map(|count| count > 0)
            .map_err(|_| create_database_error!("count_documents", COL))
    }

    /// Replace an existing report with new information
    async fn update_report(&self, report: &Report) -> Result<()> {
        self.col::<Report>(COL)
            .replace_one(doc! { "_id": &report.id }, report)
            .await
            .map(|_| ())
            .map_err(|_| create_database_error!("replace_one", COL))
    }

    /// Fetch every report ever made
    async fn fetch_all_reports(&self) -> Result<Vec<Report>> {
        self.find_reports(doc! {}).await
    }
}
