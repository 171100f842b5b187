//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use courier_entity::notification::Notification;

/// The notification projection returned by every operation.
///
/// Timestamps serialize as RFC 3339; `status` is one of
/// `queued | sent | failed` (the wire value `unknown` is reserved for
/// statuses a client cannot map and is never produced by the server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    /// Externally visible identifier.
    pub notification_id: String,
    /// `email` or `sms`.
    pub notification_type: String,
    /// Destination address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Lifecycle status.
    pub status: String,
    /// Provider message id; empty unless a sent SMS.
    pub provider_message_id: String,
    /// Dispatch attempts performed.
    pub retry_count: u32,
    /// Earliest permitted dispatch time, when scheduled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Most recent attempt time, once attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempted_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            notification_id: n.notification_id.into_string(),
            notification_type: n.kind.as_str().to_string(),
            recipient: n.recipient,
            subject: n.subject,
            message: n.message,
            status: n.status.as_str().to_string(),
            provider_message_id: n.provider_message_id,
            retry_count: n.retry_count,
            scheduled_for: n.scheduled_for,
            last_attempted_at: n.last_attempted_at,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

/// Listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotificationsResponse {
    /// Matching notifications, newest first.
    pub notifications: Vec<NotificationResponse>,
}
