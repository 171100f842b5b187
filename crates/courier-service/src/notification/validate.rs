//! Submission request validation.

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_entity::notification::NotificationKind;

use crate::context::TenantProfile;
use crate::notification::request::NotificationRequest;

/// Enforce field presence and tenant gating before any persistence.
///
/// SMS submissions are rejected up front when the tenant has no SMS sender
/// configured; nothing is stored for them.
pub fn validate_request(profile: &TenantProfile, request: &NotificationRequest) -> AppResult<()> {
    if request.recipient.trim().is_empty() {
        return Err(AppError::validation("recipient must not be empty"));
    }
    if request.message.trim().is_empty() {
        return Err(AppError::validation("message must not be empty"));
    }
    if request.kind == NotificationKind::Sms && !profile.sms_enabled() {
        return Err(AppError::sms_disabled(
            "sms delivery disabled: no SMS sender configured for tenant",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::service::tests::{profile_with_sms, profile_without_sms};
    use courier_core::error::ErrorKind;

    fn request(kind: NotificationKind) -> NotificationRequest {
        NotificationRequest::new(kind, "u@example.com", "Hi", "Body")
    }

    #[test]
    fn test_recipient_and_message_are_required() {
        let profile = profile_with_sms();

        let mut missing_recipient = request(NotificationKind::Email);
        missing_recipient.recipient = "  ".to_string();
        let err = validate_request(&profile, &missing_recipient).expect_err("recipient");
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut missing_message = request(NotificationKind::Email);
        missing_message.message = String::new();
        assert!(validate_request(&profile, &missing_message).is_err());
    }

    #[test]
    fn test_sms_gating_depends_on_profile() {
        let sms = request(NotificationKind::Sms);

        let err = validate_request(&profile_without_sms(), &sms).expect_err("sms disabled");
        assert_eq!(err.kind, ErrorKind::SmsDisabled);

        assert!(validate_request(&profile_with_sms(), &sms).is_ok());
    }
}
