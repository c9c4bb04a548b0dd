use beacon_models::v0::{Report, ReportType, Severity};
use beacon_result::{create_error, Result};

use crate::events::{Escalation, ReportSubmitted};

/// Pending-report cutoffs per severity tier
///
/// Validated strictly increasing at construction and never
/// re-validated afterwards.
#[derive(Debug, Clone)]
pub struct ThresholdConfig {
    low: usize,
    medium: usize,
    high: usize,
    critical: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low: 1,
            medium: 3,
            high: 5,
            critical: 10,
        }
    }
}

impl ThresholdConfig {
    pub fn new(low: usize, medium: usize, high: usize, critical: usize) -> Result<Self> {
        if low < medium && medium < high && high < critical {
            Ok(Self {
                low,
                medium,
                high,
                critical,
            })
        } else {
            Err(create_error!(InvalidConfiguration {
                reason: format!(
                    "thresholds must be strictly increasing, got {low} < {medium} < {high} < {critical}"
                )
            }))
        }
    }

    /// Map a pending-report count to a severity tier
    ///
    /// `None` means the count does not warrant an alert.
    pub fn severity(&self, pending_count: usize) -> Option<Severity> {
        if pending_count >= self.critical {
            Some(Severity::Critical)
        } else if pending_count >= self.high {
            Some(Severity::High)
        } else if pending_count >= self.medium {
            Some(Severity::Medium)
        } else if pending_count >= self.low {
            Some(Severity::Low)
        } else {
            None
        }
    }

    /// Evaluate a submission event into an escalation, if any
    pub fn evaluate(&self, event: &ReportSubmitted) -> Option<Escalation> {
        let report_count = event.pending.len();
        let severity = self.severity(report_count)?;
        let dominant_type = dominant_type(&event.pending)?;

        Some(Escalation {
            target_id: event.report.target_id.to_string(),
            severity,
            report_count,
            dominant_type,
        })
    }
}

/// Most common violation category among the given reports
///
/// Ties are broken by the canonical `ReportType` order so repeated
/// runs over the same input always agree, regardless of the order
/// the store returned the reports in.
pub fn dominant_type(reports: &[Report]) -> Option<ReportType> {
    let mut dominant = None;
    let mut highest = 0;

    for report_type in ReportType::ALL {
        let count = reports
            .iter()
            .filter(|report| report.report_type == report_type)
            .count();
        if count > highest {
            highest = count;
            dominant = Some(report_type);
        }
    }

    dominant
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_models::v0::ReportStatus;
    use iso8601_timestamp::Timestamp;

    fn report_of(report_type: ReportType) -> Report {
        Report {
            id: ulid::Ulid::new().to_string(),
            target_id: "post-a".to_string(),
            author_id: "user-1".to_string(),
            report_type,
            description: String::new(),
            timestamp: Timestamp::now_utc(),
            status: ReportStatus::Pending {},
            notes: String::new(),
        }
    }

    #[test]
    fn default_cutoffs() {
        let cfg = ThresholdConfig::default();
        assert_eq!(cfg.severity(0), None);
        assert_eq!(cfg.severity(1), Some(Severity::Low));
        assert_eq!(cfg.severity(2), Some(Severity::Low));
        assert_eq!(cfg.severity(3), Some(Severity::Medium));
        assert_eq!(cfg.severity(5), Some(Severity::High));
        assert_eq!(cfg.severity(9), Some(Severity::High));
        assert_eq!(cfg.severity(10), Some(Severity::Critical));
        assert_eq!(cfg.severity(1000), Some(Severity::Critical));
    }

    #[test]
    fn severity_is_monotonic() {
        let cfg = ThresholdConfig::new(2, 4, 8, 16).unwrap();
        let mut previous = None;
        for count in 0..40 {
            let severity = cfg.severity(count);
            assert!(severity >= previous, "severity regressed at count {count}");
            previous = severity;
        }
    }

    #[test]
    fn rejects_non_monotonic_cutoffs() {
        assert!(ThresholdConfig::new(1, 3, 3, 10).is_err());
        assert!(ThresholdConfig::new(5, 3, 8, 10).is_err());
        assert!(ThresholdConfig::new(1, 2, 10, 4).is_err());
    }

    #[test]
    fn dominant_type_picks_the_majority() {
        let reports = vec![
            report_of(ReportType::Spam),
            report_of(ReportType::Harassment),
            report_of(ReportType::Harassment),
        ];
        assert_eq!(dominant_type(&reports), Some(ReportType::Harassment));
    }

    #[test]
    fn dominant_type_ties_break_deterministically() {
        // harassment precedes spam in the canonical order
        let mut reports = vec![
            report_of(ReportType::Spam),
            report_of(ReportType::Harassment),
        ];
        assert_eq!(dominant_type(&reports), Some(ReportType::Harassment));

        // input order does not matter
        reports.reverse();
        assert_eq!(dominant_type(&reports), Some(ReportType::Harassment));

        assert_eq!(dominant_type(&[]), None);
    }
}
