//! Retry worker — the periodic loop that redispatches pending notifications.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use courier_database::repositories::NotificationRepository;
use courier_entity::notification::{Notification, NotificationKind};
use courier_service::notification::dispatch::dispatch_notification;
use courier_service::TenantProfile;

use crate::backoff;

/// Single-consumer retry worker.
///
/// One tick at a time: the loop wakes on a fixed interval, sweeps the
/// candidate set, and records per-row outcomes. Dispatch and storage
/// failures never stop the sweep.
#[derive(Debug)]
pub struct RetryWorker {
    repo: Arc<NotificationRepository>,
    profile: Arc<TenantProfile>,
}

impl RetryWorker {
    /// Create a new retry worker.
    pub fn new(repo: Arc<NotificationRepository>, profile: Arc<TenantProfile>) -> Self {
        Self { repo, profile }
    }

    /// Run until the cancel signal flips. An in-flight sweep is dropped at
    /// the next await point when cancellation arrives.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        let delivery = &self.profile.delivery;
        info!(
            interval_sec = delivery.retry_interval_sec,
            max_retries = delivery.max_retries,
            "Retry worker started"
        );

        let mut ticker = tokio::time::interval(delivery.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() yields immediately; consume that so the first sweep
        // runs one full interval after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    tokio::select! {
                        changed = cancel.changed() => {
                            if changed.is_err() || *cancel.borrow() {
                                break;
                            }
                        }
                        _ = self.run_tick_at(Utc::now()) => {}
                    }
                }
            }
        }

        info!("Retry worker stopped");
    }

    /// One sweep over the candidate set, evaluated against `now`.
    ///
    /// Exposed so tests can drive the worker with a synthetic clock.
    pub async fn run_tick_at(&self, now: DateTime<Utc>) {
        let candidates = match self.repo.list_pending(self.profile.delivery.max_retries).await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(error = %e, "Failed to load retry candidates");
                return;
            }
        };
        if candidates.is_empty() {
            return;
        }
        debug!(count = candidates.len(), "Sweeping retry candidates");

        for notification in candidates {
            self.process_candidate(notification, now).await;
        }
    }

    async fn process_candidate(&self, mut notification: Notification, now: DateTime<Utc>) {
        // Never dispatch ahead of the schedule, regardless of status.
        if let Some(scheduled_for) = notification.scheduled_for {
            if now < scheduled_for {
                return;
            }
        }

        // SMS rows left over from a configuration that had SMS enabled
        // burn an attempt and fail without a provider call.
        if notification.kind == NotificationKind::Sms && !self.profile.sms_enabled() {
            warn!(
                notification_id = %notification.notification_id,
                "SMS delivery disabled; marking attempt failed"
            );
            notification.mark_failed(now);
            notification.retry_count += 1;
            self.save_outcome(&notification).await;
            return;
        }

        if notification.retry_count > 0 {
            if let Some(last_attempted_at) = notification.last_attempted_at {
                let next_attempt = backoff::next_attempt_at(
                    last_attempted_at,
                    self.profile.delivery.retry_interval_sec,
                    notification.retry_count,
                );
                if now < next_attempt {
                    return;
                }
            }
        }

        info!(
            notification_id = %notification.notification_id,
            kind = %notification.kind,
            retry_count = notification.retry_count,
            "Dispatching notification"
        );

        match dispatch_notification(&self.profile, &notification).await {
            Ok(outcome) => notification.mark_sent(outcome.provider_message_id, now),
            Err(dispatch_error) => {
                warn!(
                    notification_id = %notification.notification_id,
                    error = %dispatch_error,
                    "Dispatch attempt failed"
                );
                notification.mark_failed(now);
            }
        }
        notification.retry_count += 1;
        self.save_outcome(&notification).await;
    }

    /// Record the attempt. A storage failure is logged and the sweep moves
    /// on; the row will be picked up again on a later tick.
    async fn save_outcome(&self, notification: &Notification) {
        if let Err(save_error) = self.repo.save(notification).await {
            error!(
                notification_id = %notification.notification_id,
                error = %save_error,
                "Failed to record dispatch outcome"
            );
        }
    }
}
