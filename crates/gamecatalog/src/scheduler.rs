//! Background task firing the release notifier on its trigger.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::{sync::broadcast, task::JoinHandle};

use gamecatalog_core::notify::{NotifyError, Trigger};

use crate::notifier::ReleaseNotifier;

/// Spawns the notifier loop. It stops when `shutdown` fires or its sender drops.
pub fn spawn(
    notifier: Arc<ReleaseNotifier>,
    trigger: Trigger,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(%trigger, "Release notifier scheduled");

        let mut last_fired = None;
        loop {
            let now = Utc::now();
            let slot = next_slot(&trigger, now, last_fired);
            let delay = (slot - now).to_std().unwrap_or_default();
            tracing::debug!(next_run = %slot, "Waiting for next notifier run");

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    last_fired = Some(slot);
                    match notifier.run_once(slot.date_naive()).await {
                        Ok(report) => {
                            tracing::info!(notified = report.notified, "Scheduled notifier run finished");
                        }
                        Err(NotifyError::AlreadyRunning) => {}
                        Err(err) => {
                            tracing::error!(error = %err, "Scheduled notifier run failed");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Release notifier stopping");
                    break;
                }
            }
        }
    })
}

/// Next firing after both `now` and the last slot fired.
///
/// The wait runs on the monotonic clock, so the wall clock may still read
/// slightly before the slot that just fired.
fn next_slot(
    trigger: &Trigger,
    now: DateTime<Utc>,
    last_fired: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    let from = last_fired.map_or(now, |last| last.max(now));
    trigger.next_fire_after(from)
}
