use serde::Serialize;
use thiserror::Error;

use crate::storage::{DateRangeError, RepositoryError};

/// A subscriber the newsletter could not be handed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDelivery {
    pub to: String,
    pub reason: String,
}

/// Outcome of one notification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationReport {
    /// Games in the release window.
    pub games: usize,
    /// Subscribers found.
    pub subscribers: usize,
    /// Subscribers whose email was handed to the transport.
    pub notified: usize,
    pub failed: Vec<FailedDelivery>,
}

impl NotificationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Errors ending a notification pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("A notification run is already in progress")]
    AlreadyRunning,
    #[error("Invalid release window: {0}")]
    Window(#[from] DateRangeError),
    #[error("Failed to load recipients or games: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Failed to notify {} of {} subscribers", .0.failed.len(), .0.subscribers)]
    PartialOrTotalSendFailure(NotificationReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_completeness() {
        let mut report = NotificationReport {
            games: 3,
            subscribers: 2,
            notified: 2,
            failed: vec![],
        };
        assert!(report.is_complete());

        report.notified = 1;
        report.failed.push(FailedDelivery {
            to: "b@example.com".to_string(),
            reason: "timeout".to_string(),
        });
        assert!(!report.is_complete());
    }

    #[test]
    fn test_send_failure_display() {
        let report = NotificationReport {
            games: 1,
            subscribers: 4,
            notified: 3,
            failed: vec![FailedDelivery {
                to: "d@example.com".to_string(),
                reason: "rejected".to_string(),
            }],
        };
        assert_eq!(
            NotifyError::PartialOrTotalSendFailure(report).to_string(),
            "Failed to notify 1 of 4 subscribers"
        );
    }
}
