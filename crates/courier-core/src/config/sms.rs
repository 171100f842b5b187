//! SMS provider credentials.

use serde::{Deserialize, Serialize};

/// Per-tenant SMS provider configuration.
///
/// The section is optional; a missing or incomplete section disables SMS
/// delivery for the tenant, which the submission pipeline and retry worker
/// treat as a first-class state rather than an error at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Provider account identifier.
    pub account_sid: String,
    /// Provider auth token.
    pub auth_token: String,
    /// Sending phone number in E.164 form.
    pub from_number: String,
}

impl SmsConfig {
    /// All three credentials must be present for SMS to be enabled.
    pub fn is_complete(&self) -> bool {
        !self.account_sid.trim().is_empty()
            && !self.auth_token.trim().is_empty()
            && !self.from_number.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_credentials_disable_sms() {
        let sms = SmsConfig {
            account_sid: "AC123".to_string(),
            auth_token: "   ".to_string(),
            from_number: "+15550000001".to_string(),
        };
        assert!(!sms.is_complete());
    }

    #[test]
    fn test_complete_credentials_enable_sms() {
        let sms = SmsConfig {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550000001".to_string(),
        };
        assert!(sms.is_complete());
    }
}
