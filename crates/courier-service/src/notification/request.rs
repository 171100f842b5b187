//! The accepted submission request, after wire decoding.

use chrono::{DateTime, Utc};

use courier_entity::notification::{EmailAttachment, NotificationKind};

/// A decoded submission request.
///
/// The transport edge has already mapped the wire `type` string onto
/// [`NotificationKind`] and parsed `scheduled_time` into a UTC instant;
/// field-level validation happens in [`crate::notification::validate`].
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    /// Delivery channel.
    pub kind: NotificationKind,
    /// Destination address.
    pub recipient: String,
    /// Subject line; ignored for SMS.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Attachments; only valid for email.
    pub attachments: Vec<EmailAttachment>,
    /// Earliest UTC moment at which dispatch is permitted.
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl NotificationRequest {
    /// A bare request with no attachments and no schedule.
    pub fn new(
        kind: NotificationKind,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            recipient: recipient.into(),
            subject: subject.into(),
            message: message.into(),
            attachments: Vec::new(),
            scheduled_for: None,
        }
    }

    /// Attach payloads to the request.
    pub fn with_attachments(mut self, attachments: Vec<EmailAttachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Delay dispatch until the given UTC instant.
    pub fn with_schedule(mut self, scheduled_for: DateTime<Utc>) -> Self {
        self.scheduled_for = Some(scheduled_for);
        self
    }
}
