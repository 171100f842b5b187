//! Shared dispatch path for the submission pipeline and the retry worker.

use tokio::time::timeout;
use tracing::debug;

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_entity::notification::{Notification, NotificationKind};

use crate::context::TenantProfile;

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    /// Provider message id; present only for SMS.
    pub provider_message_id: Option<String>,
}

/// Invoke the sender capability matching the notification's kind.
///
/// Every provider call is bounded by the profile's operation timeout;
/// expiry is recorded as an ordinary dispatch failure. Errors are opaque —
/// any `Err` feeds the caller's retry accounting.
pub async fn dispatch_notification(
    profile: &TenantProfile,
    notification: &Notification,
) -> AppResult<DispatchOutcome> {
    let operation_timeout = profile.delivery.operation_timeout();

    match notification.kind {
        NotificationKind::Email => {
            let send = profile.email_sender.send(
                &notification.recipient,
                &notification.subject,
                &notification.message,
                &notification.attachments,
            );
            timeout(operation_timeout, send)
                .await
                .map_err(|_| AppError::dispatch("email dispatch timed out"))??;
            debug!(
                notification_id = %notification.notification_id,
                "Email dispatched"
            );
            Ok(DispatchOutcome::default())
        }
        NotificationKind::Sms => {
            let sender = profile.sms_sender.as_ref().ok_or_else(|| {
                AppError::sms_disabled("sms delivery disabled: no SMS sender configured for tenant")
            })?;
            let send = sender.send(&notification.recipient, &notification.message);
            let provider_message_id = timeout(operation_timeout, send)
                .await
                .map_err(|_| AppError::dispatch("sms dispatch timed out"))??;
            debug!(
                notification_id = %notification.notification_id,
                "SMS dispatched"
            );
            Ok(DispatchOutcome {
                provider_message_id: Some(provider_message_id),
            })
        }
    }
}
