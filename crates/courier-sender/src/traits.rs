//! Sender capability contracts.

use async_trait::async_trait;

use courier_core::result::AppResult;
use courier_entity::notification::EmailAttachment;

/// Capability to deliver an email, optionally with attachments.
///
/// Implementations may block on network I/O and must honor task
/// cancellation: callers wrap every send in an operation timeout and may
/// drop the future on shutdown.
#[async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug {
    /// Deliver one email. Any error is a dispatch failure.
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        attachments: &[EmailAttachment],
    ) -> AppResult<()>;
}

/// Capability to deliver an SMS.
///
/// A tenant without this capability has SMS disabled; the engine treats
/// that as a first-class state, not an error at construction time.
#[async_trait]
pub trait SmsSender: Send + Sync + std::fmt::Debug {
    /// Deliver one SMS. Returns the provider's opaque message id.
    async fn send(&self, recipient: &str, body: &str) -> AppResult<String>;
}
