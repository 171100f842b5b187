//! SMTP email sender backed by lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::address::Envelope;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::debug;

use courier_core::config::EmailConfig;
use courier_core::error::{AppError, ErrorKind};
use courier_core::result::AppResult;
use courier_entity::notification::EmailAttachment;

use crate::mime;
use crate::traits::EmailSender;

/// Sends email through a tenant's SMTP relay.
///
/// Port 465 uses implicit TLS; every other port negotiates STARTTLS. The
/// message itself is composed by [`mime::build_message`] so the on-wire
/// format stays under this crate's contract tests.
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl std::fmt::Debug for SmtpEmailSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpEmailSender")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl SmtpEmailSender {
    /// Build a sender from tenant SMTP credentials.
    pub fn new(config: &EmailConfig, connection_timeout: Duration) -> AppResult<Self> {
        let builder = if config.smtp_port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        }
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid SMTP relay {}: {e}", config.smtp_host),
                e,
            )
        })?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .timeout(Some(connection_timeout))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        attachments: &[EmailAttachment],
    ) -> AppResult<()> {
        let from: Address = self.from_address.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Dispatch,
                format!("Invalid from address {}: {e}", self.from_address),
                e,
            )
        })?;
        let to: Address = recipient.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Dispatch,
                format!("Invalid recipient address {recipient}: {e}"),
                e,
            )
        })?;

        let envelope = Envelope::new(Some(from), vec![to])
            .map_err(|e| AppError::with_source(ErrorKind::Dispatch, "Invalid envelope", e))?;

        let message = mime::build_message(
            &self.from_address,
            recipient,
            subject,
            body,
            attachments,
        );

        self.transport
            .send_raw(&envelope, message.as_bytes())
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Dispatch, format!("SMTP send failed: {e}"), e)
            })?;

        debug!(recipient, attachments = attachments.len(), "Email handed to SMTP relay");
        Ok(())
    }
}
