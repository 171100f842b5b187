//! Notification lifecycle service: submission, queries, and mutations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_core::types::NotificationId;
use courier_database::repositories::NotificationRepository;
use courier_entity::notification::{Notification, NotificationFilter, NotificationStatus};

use crate::context::TenantProfile;
use crate::notification::attachments::normalize_attachments;
use crate::notification::dispatch::dispatch_notification;
use crate::notification::request::NotificationRequest;
use crate::notification::validate::validate_request;

/// Accepts, queries, and mutates notifications for one tenant.
///
/// Submission attempts immediate dispatch when the schedule allows, then
/// persists the outcome; the retry worker picks up whatever did not go out
/// on the first try.
#[derive(Debug, Clone)]
pub struct NotificationService {
    repo: Arc<NotificationRepository>,
    profile: Arc<TenantProfile>,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(repo: Arc<NotificationRepository>, profile: Arc<TenantProfile>) -> Self {
        Self { repo, profile }
    }

    /// Accept a submission: validate, normalize, attempt immediate dispatch
    /// when eligible, persist, and return the stored record.
    ///
    /// A dispatch failure is not a submission failure — the notification is
    /// stored as `failed` with `retry_count = 0` and the worker takes over.
    /// A provider call whose persistence then fails is not retracted; the
    /// next attempt may duplicate it (documented at-least-once semantics).
    pub async fn send_notification(
        &self,
        request: NotificationRequest,
    ) -> AppResult<Notification> {
        validate_request(&self.profile, &request)?;
        let attachments = normalize_attachments(request.kind, &request.attachments)?;

        let notification_id = NotificationId::generate();
        let now = Utc::now();
        let mut notification = Notification::queued(
            notification_id,
            request.kind,
            request.recipient,
            request.subject,
            request.message,
            attachments,
            request.scheduled_for,
            now,
        );

        if notification.dispatch_eligible(now) {
            match dispatch_notification(&self.profile, &notification).await {
                Ok(outcome) => notification.mark_sent(outcome.provider_message_id, now),
                Err(dispatch_error) => {
                    error!(
                        notification_id = %notification.notification_id,
                        error = %dispatch_error,
                        "Immediate dispatch failed"
                    );
                    notification.mark_failed(now);
                }
            }
        }

        let stored = self.repo.create(&notification).await?;
        info!(
            notification_id = %stored.notification_id,
            kind = %stored.kind,
            status = %stored.status,
            "Notification persisted"
        );
        Ok(stored)
    }

    /// Look up a notification by id. Pure projection.
    pub async fn get_notification_status(
        &self,
        notification_id: &NotificationId,
    ) -> AppResult<Notification> {
        self.repo.get(notification_id).await
    }

    /// List notifications, optionally restricted by status.
    pub async fn list_notifications(
        &self,
        filter: &NotificationFilter,
    ) -> AppResult<Vec<Notification>> {
        self.repo.list(filter).await
    }

    /// Move a queued notification to a new future dispatch time.
    ///
    /// Read-modify-save: the row state is re-checked against the store so a
    /// worker attempt that already landed wins over the mutation.
    pub async fn reschedule_notification(
        &self,
        notification_id: &NotificationId,
        scheduled_for: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let mut notification = self.repo.get(notification_id).await?;
        if notification.status != NotificationStatus::Queued {
            return Err(AppError::not_editable(
                "notification can only be rescheduled while queued",
            ));
        }
        if scheduled_for <= Utc::now() {
            return Err(AppError::schedule_past("scheduled_time must be in the future"));
        }

        notification.scheduled_for = Some(scheduled_for);
        self.repo.save(&notification).await?;
        info!(
            notification_id = %notification.notification_id,
            scheduled_for = %scheduled_for,
            "Notification rescheduled"
        );
        self.repo.get(notification_id).await
    }

    /// Cancel a queued notification.
    ///
    /// The cancellation is recorded as a terminal non-success: the status
    /// becomes `failed` and the retry budget is exhausted so the worker
    /// never selects the row again.
    pub async fn cancel_notification(
        &self,
        notification_id: &NotificationId,
    ) -> AppResult<Notification> {
        let mut notification = self.repo.get(notification_id).await?;
        if notification.status != NotificationStatus::Queued {
            return Err(AppError::not_editable(
                "notification can only be cancelled while queued",
            ));
        }

        notification.status = NotificationStatus::Failed;
        notification.provider_message_id = String::new();
        notification.retry_count = self.profile.delivery.max_retries;
        self.repo.save(&notification).await?;
        warn!(
            notification_id = %notification.notification_id,
            "Notification cancelled"
        );
        self.repo.get(notification_id).await
    }
}
