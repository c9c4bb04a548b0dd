//! Report aggregation and escalation engine
//!
//! Users flag a target, intake deduplicates and commits the report,
//! the threshold evaluator classifies the pending count into a
//! severity tier, the aggregator maintains one live alert per
//! target, and the router fans the alert out to the right tier of
//! reviewers. Stages are composed synchronously within a request
//! but are independently testable.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use beacon_database::Database;
use beacon_models::v0::{Alert, Report, Statistics, TargetReportSummary};
use beacon_result::Result;

pub mod alerts;
pub mod dispatch;
pub mod events;
pub mod intake;
pub mod locks;
pub mod review;
pub mod router;
pub mod stats;
pub mod thresholds;

pub use dispatch::{ChannelDispatcher, Directory};
pub use intake::DataSubmitReport;
pub use router::{Route, SeverityPolicy};
pub use thresholds::ThresholdConfig;

/// How many entries the statistics ranking keeps
const TOP_TARGETS: usize = 5;

/// The moderation engine facade
///
/// All mutations of a target's reports and alert are serialized
/// through a per-target lock; distinct targets never contend.
#[derive(Clone)]
pub struct Moderation {
    db: Database,
    thresholds: ThresholdConfig,
    policy: SeverityPolicy,
    directory: Arc<dyn Directory>,
    dispatchers: Vec<Arc<dyn ChannelDispatcher>>,
    channel_timeout: Duration,
    locks: locks::TargetLocks,
}

impl Moderation {
    pub fn new(
        db: Database,
        thresholds: ThresholdConfig,
        policy: SeverityPolicy,
        directory: Arc<dyn Directory>,
        dispatchers: Vec<Arc<dyn ChannelDispatcher>>,
        channel_timeout: Duration,
    ) -> Moderation {
        Moderation {
            db,
            thresholds,
            policy,
            directory,
            dispatchers,
            channel_timeout,
            locks: Default::default(),
        }
    }

    /// Build the engine from `Beacon.toml` configuration
    ///
    /// Threshold and policy tables are validated here, once; an
    /// invalid table refuses to start rather than limping along.
    pub async fn from_config(
        db: Database,
        directory: Arc<dyn Directory>,
        dispatchers: Vec<Arc<dyn ChannelDispatcher>>,
    ) -> Result<Moderation> {
        let settings = beacon_config::config().await;

        Ok(Moderation::new(
            db,
            ThresholdConfig::new(
                settings.thresholds.low,
                settings.thresholds.medium,
                settings.thresholds.high,
                settings.thresholds.critical,
            )?,
            SeverityPolicy::from_settings(&settings)?,
            directory,
            dispatchers,
            Duration::from_secs(settings.dispatch.channel_timeout_seconds),
        ))
    }

    /// Submit a report against a target
    ///
    /// Runs intake, threshold evaluation and the alert upsert under
    /// the target's lock, then fans any alert out to reviewers.
    /// Routing problems are logged but never surfaced to the
    /// reporter.
    pub async fn submit_report(
        &self,
        target_id: &str,
        author_id: &str,
        data: DataSubmitReport,
    ) -> Result<Report> {
        let (report, alert) = {
            let _guard = self.locks.acquire(target_id).await;
            let event = intake::submit(&self.db, target_id, author_id, data).await?;

            let alert = match self.thresholds.evaluate(&event) {
                Some(escalation) => Some(alerts::upsert(&self.db, &escalation).await?),
                None => None,
            };

            (event.report, alert)
        };

        if let Some(alert) = alert {
            dispatch::dispatch_alert(
                &self.db,
                &self.policy,
                self.directory.as_ref(),
                &self.dispatchers,
                self.channel_timeout,
                &alert,
            )
            .await;
        }

        Ok(report)
    }

    /// Whether the author already has a pending report on the target
    pub async fn has_pending_report(&self, target_id: &str, author_id: &str) -> Result<bool> {
        self.db.has_pending_report(target_id, author_id).await
    }

    /// Current reporting picture for one target
    pub async fn report_summary(&self, target_id: &str) -> Result<TargetReportSummary> {
        let reports = self.db.fetch_reports_by_target(target_id).await?;
        let alert = self.db.fetch_alert_by_target(target_id).await?;

        let mut by_type = HashMap::new();
        for report in &reports {
            *by_type.entry(report.report_type).or_default() += 1;
        }

        Ok(TargetReportSummary {
            target_id: target_id.to_string(),
            total: reports.len(),
            pending: reports.iter().filter(|report| report.is_pending()).count(),
            by_type,
            alert,
        })
    }

    /// Move a pending report into review
    pub async fn start_review(&self, report_id: &str, reviewer_id: &str) -> Result<Report> {
        let report = self.db.fetch_report(report_id).await?;
        let _guard = self.locks.acquire(&report.target_id).await;
        review::start_review(&self.db, report_id, reviewer_id).await
    }

    /// Action a report and close it
    pub async fn review(
        &self,
        report_id: &str,
        reviewer_id: &str,
        action_taken: &str,
        notes: Option<String>,
    ) -> Result<Report> {
        let report = self.db.fetch_report(report_id).await?;
        let _guard = self.locks.acquire(&report.target_id).await;
        review::action(&self.db, report_id, reviewer_id, action_taken, notes).await
    }

    /// Dismiss a report without action
    pub async fn dismiss(
        &self,
        report_id: &str,
        reviewer_id: &str,
        reason: &str,
    ) -> Result<Report> {
        let report = self.db.fetch_report(report_id).await?;
        let _guard = self.locks.acquire(&report.target_id).await;
        review::dismiss(&self.db, report_id, reviewer_id, reason).await
    }

    /// Acknowledge a target's alert, idempotently
    pub async fn acknowledge_alert(&self, target_id: &str, user_id: &str) -> Result<()> {
        let _guard = self.locks.acquire(target_id).await;
        alerts::acknowledge(&self.db, target_id, user_id).await
    }

    /// All unacknowledged alerts, most urgent first
    pub async fn unacknowledged_alerts(&self) -> Result<Vec<Alert>> {
        alerts::list_unacknowledged(&self.db).await
    }

    /// Read-side rollup over every report; eventually consistent
    pub async fn statistics(&self) -> Result<Statistics> {
        let reports = self.db.fetch_all_reports().await?;
        Ok(stats::aggregate(&reports, TOP_TARGETS))
    }
}
