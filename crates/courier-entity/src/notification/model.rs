//! The notification aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use courier_core::types::NotificationId;

use super::attachment::EmailAttachment;
use super::kind::NotificationKind;
use super::status::NotificationStatus;

/// A single delivery request with its full lifecycle state.
///
/// The store exclusively owns the durable row; the submission pipeline and
/// the retry worker hold transient copies while composing a write.
/// Attachments live in a side table and are populated by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Internal integer surrogate key. Zero until the row is persisted.
    #[sqlx(rename = "id")]
    #[serde(skip)]
    pub row_id: i64,
    /// Externally visible identifier. Immutable.
    pub notification_id: NotificationId,
    /// Delivery channel. Immutable after creation.
    pub kind: NotificationKind,
    /// Destination address (email address or E.164 phone number).
    pub recipient: String,
    /// Subject line; only meaningful for email.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Opaque id returned by the SMS provider on success; empty otherwise.
    pub provider_message_id: String,
    /// Lifecycle status.
    pub status: NotificationStatus,
    /// Number of dispatch attempts performed. Non-decreasing.
    pub retry_count: u32,
    /// UTC time of the most recent dispatch attempt; `None` if never
    /// attempted.
    pub last_attempted_at: Option<DateTime<Utc>>,
    /// Earliest UTC moment at which dispatch is permitted.
    pub scheduled_for: Option<DateTime<Utc>>,
    /// UTC creation time.
    pub created_at: DateTime<Utc>,
    /// UTC time of the last mutation. Advances on every save.
    pub updated_at: DateTime<Utc>,
    /// Ordered attachments (email only). Loaded from the side table.
    #[sqlx(skip)]
    #[serde(default)]
    pub attachments: Vec<EmailAttachment>,
}

impl Notification {
    /// Construct a queued record for a freshly accepted request.
    #[allow(clippy::too_many_arguments)]
    pub fn queued(
        notification_id: NotificationId,
        kind: NotificationKind,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
        attachments: Vec<EmailAttachment>,
        scheduled_for: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            row_id: 0,
            notification_id,
            kind,
            recipient: recipient.into(),
            subject: subject.into(),
            message: message.into(),
            provider_message_id: String::new(),
            status: NotificationStatus::Queued,
            retry_count: 0,
            last_attempted_at: None,
            scheduled_for,
            created_at: now,
            updated_at: now,
            attachments,
        }
    }

    /// Whether dispatch is permitted at `now`: either no schedule is set or
    /// the scheduled moment has arrived. `scheduled_for == now` is eligible.
    pub fn dispatch_eligible(&self, now: DateTime<Utc>) -> bool {
        match self.scheduled_for {
            None => true,
            Some(at) => at <= now,
        }
    }

    /// Record a successful dispatch. `sent` is terminal; the provider
    /// message id is only ever non-empty for SMS.
    pub fn mark_sent(&mut self, provider_message_id: Option<String>, now: DateTime<Utc>) {
        self.status = NotificationStatus::Sent;
        self.provider_message_id = provider_message_id.unwrap_or_default();
        self.last_attempted_at = Some(now);
    }

    /// Record a failed dispatch attempt. Does not touch `retry_count`;
    /// attempt accounting belongs to the caller.
    pub fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.status = NotificationStatus::Failed;
        self.provider_message_id = String::new();
        self.last_attempted_at = Some(now);
    }
}
