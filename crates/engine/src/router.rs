use std::collections::HashMap;

use beacon_config::Settings;
use beacon_models::v0::{Channel, Priority, Severity};
use beacon_result::{create_error, Result};

/// Audience and delivery parameters for one severity tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Minimum permission level a reviewer needs to be notified
    pub min_level: u32,
    /// Channels the notification goes out on
    pub channels: Vec<Channel>,
    /// Delivery priority
    pub priority: Priority,
}

/// Severity → route table
#[derive(Debug, Clone)]
pub struct SeverityPolicy {
    routes: HashMap<Severity, Route>,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        use Channel::*;

        Self::from_routes(HashMap::from([
            (
                Severity::Low,
                Route {
                    min_level: 14,
                    channels: vec![Dashboard],
                    priority: Priority::Low,
                },
            ),
            (
                Severity::Medium,
                Route {
                    min_level: 14,
                    channels: vec![Dashboard, Email],
                    priority: Priority::Medium,
                },
            ),
            (
                Severity::High,
                Route {
                    min_level: 15,
                    channels: vec![Dashboard, Email, Push],
                    priority: Priority::High,
                },
            ),
            (
                Severity::Critical,
                Route {
                    min_level: 97,
                    channels: vec![Dashboard, Email, Push, Sms],
                    priority: Priority::Urgent,
                },
            ),
        ]))
    }
}

impl SeverityPolicy {
    /// Build a policy from routes without completeness checks
    ///
    /// A severity absent from the table causes dispatch for that
    /// tier to be skipped at runtime.
    pub fn from_routes(routes: HashMap<Severity, Route>) -> Self {
        Self { routes }
    }

    /// Build and validate the policy table from configuration
    ///
    /// Fails when a tier is missing or names an unknown channel or
    /// priority; callers are expected to treat this as fatal.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut routes = HashMap::new();

        for severity in [
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            let key = severity_key(severity);
            let policy = settings.policy.get(key).ok_or_else(|| {
                create_error!(InvalidConfiguration {
                    reason: format!("missing policy entry for severity \"{key}\"")
                })
            })?;

            let channels = policy
                .channels
                .iter()
                .map(|name| parse_channel(name))
                .collect::<Result<Vec<Channel>>>()?;

            routes.insert(
                severity,
                Route {
                    min_level: policy.min_level,
                    channels,
                    priority: parse_priority(&policy.priority)?,
                },
            );
        }

        Ok(Self { routes })
    }

    /// Route for the given severity, if the table has one
    pub fn route(&self, severity: Severity) -> Option<&Route> {
        self.routes.get(&severity)
    }
}

fn severity_key(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
        Severity::Critical => "critical",
    }
}

fn parse_channel(name: &str) -> Result<Channel> {
    match name {
        "dashboard" => Ok(Channel::Dashboard),
        "email" => Ok(Channel::Email),
        "push" => Ok(Channel::Push),
        "sms" => Ok(Channel::Sms),
        other => Err(create_error!(InvalidConfiguration {
            reason: format!("unknown channel \"{other}\"")
        })),
    }
}

fn parse_priority(name: &str) -> Result<Priority> {
    match name {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        "urgent" => Ok(Priority::Urgent),
        other => Err(create_error!(InvalidConfiguration {
            reason: format!("unknown priority \"{other}\"")
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_escalation_matrix() {
        let policy = SeverityPolicy::default();

        let low = policy.route(Severity::Low).unwrap();
        assert_eq!(low.min_level, 14);
        assert_eq!(low.channels, vec![Channel::Dashboard]);

        let critical = policy.route(Severity::Critical).unwrap();
        assert_eq!(critical.min_level, 97);
        assert!(critical.channels.contains(&Channel::Sms));
        assert_eq!(critical.priority, Priority::Urgent);
    }

    #[test]
    fn unknown_channel_is_a_configuration_error() {
        assert!(parse_channel("carrier-pigeon").is_err());
        assert!(parse_priority("whenever").is_err());
    }
}
