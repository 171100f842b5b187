//! Request DTOs and their decoding into domain requests.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_entity::notification::{EmailAttachment, NotificationKind};
use courier_service::notification::NotificationRequest;

/// Submission payload.
///
/// `notification_type` is matched case-insensitively; timestamps are
/// RFC 3339 strings normalized to UTC; attachment bytes arrive base64
/// encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendNotificationRequest {
    /// `email` or `sms`, case-insensitive.
    pub notification_type: String,
    /// Destination address.
    pub recipient: String,
    /// Subject line; only meaningful for email.
    #[serde(default)]
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Base64-encoded attachments; email only.
    #[serde(default)]
    pub attachments: Vec<AttachmentPayload>,
    /// Optional RFC 3339 earliest dispatch time.
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

/// One attachment on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentPayload {
    /// Filename presented to the recipient.
    pub filename: String,
    /// MIME content type; blank means `application/octet-stream`.
    #[serde(default)]
    pub content_type: String,
    /// Base64-encoded payload bytes.
    pub data: String,
}

/// Reschedule payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    /// New RFC 3339 dispatch time; must be in the future.
    pub scheduled_time: String,
}

impl SendNotificationRequest {
    /// Decode the wire payload into a domain request.
    pub fn into_domain(self) -> AppResult<NotificationRequest> {
        let kind = NotificationKind::parse(&self.notification_type).ok_or_else(|| {
            AppError::validation(format!(
                "unsupported notification type: {}",
                self.notification_type
            ))
        })?;

        let scheduled_for = self
            .scheduled_time
            .as_deref()
            .map(parse_rfc3339_utc)
            .transpose()?;

        let attachments = self
            .attachments
            .into_iter()
            .map(AttachmentPayload::into_domain)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(NotificationRequest {
            kind,
            recipient: self.recipient,
            subject: self.subject,
            message: self.message,
            attachments,
            scheduled_for,
        })
    }
}

impl AttachmentPayload {
    fn into_domain(self) -> AppResult<EmailAttachment> {
        let data = BASE64.decode(self.data.as_bytes()).map_err(|e| {
            AppError::validation(format!(
                "attachment \"{}\" is not valid base64: {e}",
                self.filename
            ))
        })?;
        Ok(EmailAttachment::new(self.filename, self.content_type, data))
    }
}

/// Parse an RFC 3339 timestamp and normalize it to UTC.
pub fn parse_rfc3339_utc(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::validation("scheduled_time must be RFC3339"))
}
