use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use log::{error, warn};

use beacon_database::Database;
use beacon_models::v0::{Alert, Channel, DispatchResult, NotificationRecord, User};
use beacon_result::Result;
use iso8601_timestamp::Timestamp;
use ulid::Ulid;

use crate::router::{Route, SeverityPolicy};

/// External user directory
#[async_trait::async_trait]
pub trait Directory: Sync + Send {
    /// All users at or above the given permission level
    async fn resolve_users_by_min_level(&self, level: u32) -> Result<Vec<User>>;
}

/// Delivery backend for one notification channel
///
/// Implementations own their transport; a failed or slow send is
/// reported through the returned result, never by panicking.
#[async_trait::async_trait]
pub trait ChannelDispatcher: Sync + Send {
    /// Channel this dispatcher delivers through
    fn channel(&self) -> Channel;

    /// Deliver the notification to the resolved audience
    async fn send(&self, record: &NotificationRecord, users: &[User]) -> DispatchResult;
}

/// Route an alert to its audience and fan it out
///
/// Best effort by design: a missing policy entry or directory
/// failure is logged and skipped, and per-channel failures never
/// affect the other channels. Callers on the submission path must
/// not treat any of this as a submission failure.
pub async fn dispatch_alert(
    db: &Database,
    policy: &SeverityPolicy,
    directory: &dyn Directory,
    dispatchers: &[Arc<dyn ChannelDispatcher>],
    channel_timeout: Duration,
    alert: &Alert,
) {
    let Some(route) = policy.route(alert.severity) else {
        error!(
            "no policy entry for severity {:?}, skipping dispatch for target {}",
            alert.severity, alert.target_id
        );
        return;
    };

    let users = match directory.resolve_users_by_min_level(route.min_level).await {
        Ok(users) => users,
        Err(err) => {
            error!(
                "failed to resolve audience for target {}: {err}",
                alert.target_id
            );
            return;
        }
    };

    let record = NotificationRecord {
        id: Ulid::new().to_string(),
        severity: alert.severity,
        target_id: alert.target_id.to_string(),
        report_count: alert.report_count,
        message: alert.message.to_string(),
        target_user_ids: users.iter().map(|user| user.id.to_string()).collect(),
        priority: route.priority,
        created_at: Timestamp::now_utc(),
        sent_at: None,
        results: vec![],
    };

    if let Err(err) = db.insert_notification(&record).await {
        error!("failed to record notification for {}: {err}", alert.target_id);
    }

    // Results are persisted one by one as channels finish, so an
    // interrupted fan-out still leaves behind what it managed to do.
    let mut attempts = fan_out(dispatchers, route, channel_timeout, &record, &users);
    while let Some(result) = attempts.next().await {
        if !result.success {
            warn!(
                "channel {} failed for target {}: {}",
                result.channel,
                alert.target_id,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }

        if let Err(err) = db.append_dispatch_result(&record.id, &result).await {
            error!("failed to record dispatch result: {err}");
        }
    }

    if let Err(err) = db
        .mark_notification_sent(&record.id, Timestamp::now_utc())
        .await
    {
        error!("failed to stamp notification as sent: {err}");
    }
}

/// Parallel send across the route's channels, each attempt bounded
/// by the per-channel timeout
fn fan_out<'a>(
    dispatchers: &'a [Arc<dyn ChannelDispatcher>],
    route: &'a Route,
    channel_timeout: Duration,
    record: &'a NotificationRecord,
    users: &'a [User],
) -> FuturesUnordered<impl std::future::Future<Output = DispatchResult> + 'a> {
    dispatchers
        .iter()
        .filter(|dispatcher| route.channels.contains(&dispatcher.channel()))
        .map(|dispatcher| async move {
            match tokio::time::timeout(channel_timeout, dispatcher.send(record, users)).await {
                Ok(result) => result,
                Err(_) => DispatchResult {
                    channel: dispatcher.channel(),
                    success: false,
                    error: Some("timed out".to_string()),
                },
            }
        })
        .collect()
}
