//! Weekly release newsletter.
//!
//! [`ReleaseNotifier::run_once`] is the single entry point used by both the
//! scheduler task and the `send-emails` command. It keeps no state between
//! runs apart from the run-in-progress guard.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use gamecatalog_core::notify::{
    upcoming_window, weekly_digest, FailedDelivery, Mailer, NotificationReport, NotifyError,
    RELEASE_WINDOW_DAYS,
};
use gamecatalog_core::storage::{UserRepository, VideoGameRepository};

use crate::storage::Store;

/// Sends the upcoming releases to every newsletter subscriber.
pub struct ReleaseNotifier {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
    running: Mutex<()>,
}

impl ReleaseNotifier {
    pub fn new(store: Arc<dyn Store>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            mailer,
            running: Mutex::new(()),
        }
    }

    /// Runs one notification pass for the window starting at `today`.
    ///
    /// Every subscriber is attempted even when earlier sends fail. Any failed
    /// send turns the result into `PartialOrTotalSendFailure` carrying the
    /// full report. A pass started while another is in progress returns
    /// `AlreadyRunning` without touching the store or the mailer.
    pub async fn run_once(&self, today: NaiveDate) -> Result<NotificationReport, NotifyError> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::warn!("Notification run skipped, previous run still in progress");
            return Err(NotifyError::AlreadyRunning);
        };

        let window = upcoming_window(today, RELEASE_WINDOW_DAYS)?;
        let games = self.store.find_released_between(window).await?;
        let subscribers = self.store.find_newsletter_subscribers().await?;

        tracing::info!(
            start = %window.start,
            end = %window.end,
            games = games.len(),
            subscribers = subscribers.len(),
            "Sending release newsletter"
        );

        let mut report = NotificationReport {
            games: games.len(),
            subscribers: subscribers.len(),
            ..NotificationReport::default()
        };

        for message in weekly_digest(&subscribers, &games) {
            match self.mailer.send(&message).await {
                Ok(()) => report.notified += 1,
                Err(err) => {
                    tracing::warn!(to = %message.to, error = %err, "Failed to send newsletter");
                    report.failed.push(FailedDelivery {
                        to: message.to,
                        reason: err.to_string(),
                    });
                }
            }
        }

        if report.is_complete() {
            tracing::info!(notified = report.notified, "Release newsletter sent");
            Ok(report)
        } else {
            tracing::error!(
                notified = report.notified,
                failed = report.failed.len(),
                "Release newsletter partially failed"
            );
            Err(NotifyError::PartialOrTotalSendFailure(report))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Days;
    use tokio::sync::{Mutex as TokioMutex, Notify};

    use gamecatalog_core::catalog::{NewUser, NewVideoGame};
    use gamecatalog_core::notify::{EmailMessage, MailError};

    use crate::storage::InMemoryRepository;

    /// Records every message; fails for addresses listed in `reject`.
    #[derive(Default)]
    struct RecordingMailer {
        sent: TokioMutex<Vec<EmailMessage>>,
        reject: Vec<String>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
            if self.reject.contains(&message.to) {
                return Err(MailError::Transport("connection reset".to_string()));
            }
            self.sent.lock().await.push(message.clone());
            Ok(())
        }
    }

    /// Blocks inside `send` until released.
    #[derive(Default)]
    struct GateMailer {
        started: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Mailer for GateMailer {
        async fn send(&self, _message: &EmailMessage) -> Result<(), MailError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn in_days(days: u64) -> NaiveDate {
        today().checked_add_days(Days::new(days)).unwrap()
    }

    async fn store_with(games: &[NaiveDate], subscribers: &[&str]) -> Arc<InMemoryRepository> {
        let repo = Arc::new(InMemoryRepository::new());
        for (i, date) in games.iter().enumerate() {
            repo.create_video_game(NewVideoGame::new(
                format!("Game {i}"),
                *date,
                "A description long enough",
            ))
            .await
            .unwrap();
        }
        for email in subscribers {
            repo.create_user(NewUser::new(*email, "hash").with_newsletter(true))
                .await
                .unwrap();
        }
        repo.create_user(NewUser::new("silent@example.com", "hash"))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_each_subscriber_gets_every_upcoming_game() {
        let store = store_with(
            &[in_days(0), in_days(3), in_days(7), in_days(8)],
            &["a@example.com", "b@example.com"],
        )
        .await;
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = ReleaseNotifier::new(store, mailer.clone());

        let report = notifier.run_once(today()).await.unwrap();

        assert_eq!(report.games, 3);
        assert_eq!(report.subscribers, 2);
        assert_eq!(report.notified, 2);

        let sent = mailer.sent.lock().await;
        assert_eq!(sent.len(), 2);
        for message in sent.iter() {
            assert_eq!(message.games.len(), 3);
        }
        let recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[tokio::test]
    async fn test_no_subscribers_sends_nothing() {
        let store = store_with(&[in_days(1)], &[]).await;
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = ReleaseNotifier::new(store, mailer.clone());

        let report = notifier.run_once(today()).await.unwrap();

        assert_eq!(report.notified, 0);
        assert_eq!(report.subscribers, 0);
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_send_does_not_stop_the_run() {
        let store = store_with(
            &[in_days(2)],
            &["a@example.com", "broken@example.com", "c@example.com"],
        )
        .await;
        let mailer = Arc::new(RecordingMailer {
            reject: vec!["broken@example.com".to_string()],
            ..RecordingMailer::default()
        });
        let notifier = ReleaseNotifier::new(store, mailer.clone());

        let report = match notifier.run_once(today()).await {
            Err(NotifyError::PartialOrTotalSendFailure(report)) => report,
            other => panic!("expected a send failure, got {other:?}"),
        };
        assert_eq!(report.notified, 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].to, "broken@example.com");
        assert_eq!(mailer.sent.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_run_is_rejected() {
        let store = store_with(&[in_days(1)], &["a@example.com"]).await;
        let mailer = Arc::new(GateMailer::default());
        let notifier = Arc::new(ReleaseNotifier::new(store, mailer.clone()));

        let first = tokio::spawn({
            let notifier = notifier.clone();
            async move { notifier.run_once(today()).await }
        });
        mailer.started.notified().await;

        let second = notifier.run_once(today()).await;
        assert_eq!(second, Err(NotifyError::AlreadyRunning));

        mailer.release.notify_one();
        let report = first.await.unwrap().unwrap();
        assert_eq!(report.notified, 1);
        assert_eq!(mailer.calls.load(Ordering::SeqCst), 1);

        // Guard released once the first run finished.
        let mailer_calls_before = mailer.calls.load(Ordering::SeqCst);
        mailer.release.notify_one();
        notifier.run_once(today()).await.unwrap();
        assert_eq!(mailer.calls.load(Ordering::SeqCst), mailer_calls_before + 1);
    }
}
