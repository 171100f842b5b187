//! SMTP credentials for the email sender.

use serde::{Deserialize, Serialize};

/// Per-tenant SMTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP server host.
    pub smtp_host: String,
    /// SMTP server port. Port 465 uses implicit TLS; others use STARTTLS.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    pub smtp_username: String,
    /// SMTP password.
    pub smtp_password: String,
    /// Sender address placed in the `From` header and envelope.
    pub from_address: String,
}

fn default_smtp_port() -> u16 {
    587
}
