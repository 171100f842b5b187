//! Attachment validation and canonicalization.
//!
//! Applies only to email submissions. Rules run in a fixed order so the
//! first offending attachment is the one named in the error.

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_entity::notification::{EmailAttachment, NotificationKind};

/// Maximum number of attachments per notification.
pub const MAX_ATTACHMENT_COUNT: usize = 10;
/// Per-file payload cap: 5 MiB.
pub const MAX_ATTACHMENT_SIZE_BYTES: usize = 5 * 1024 * 1024;
/// Aggregate payload cap: 25 MiB.
pub const MAX_TOTAL_ATTACHMENT_SIZE_BYTES: usize = 25 * 1024 * 1024;
/// Content type assigned when the caller left it blank.
pub const DEFAULT_ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// Validate and canonicalize attachments before persistence.
///
/// Returns the normalized list (trimmed filenames, defaulted content types,
/// defensively copied bytes) or a validation error identifying the
/// offending attachment.
pub fn normalize_attachments(
    kind: NotificationKind,
    attachments: &[EmailAttachment],
) -> AppResult<Vec<EmailAttachment>> {
    if attachments.is_empty() {
        return Ok(Vec::new());
    }
    if kind != NotificationKind::Email {
        return Err(AppError::validation(
            "attachments are supported only for email notifications",
        ));
    }
    if attachments.len() > MAX_ATTACHMENT_COUNT {
        return Err(AppError::validation(format!(
            "too many attachments: max {MAX_ATTACHMENT_COUNT}"
        )));
    }

    let mut total_size = 0usize;
    let mut normalized = Vec::with_capacity(attachments.len());
    for (index, attachment) in attachments.iter().enumerate() {
        let filename = attachment.filename.trim();
        if filename.is_empty() {
            return Err(AppError::validation(format!(
                "attachment {} missing filename",
                index + 1
            )));
        }

        let data = attachment.data.clone();
        if data.is_empty() {
            return Err(AppError::validation(format!(
                "attachment \"{filename}\" has empty data"
            )));
        }
        if data.len() > MAX_ATTACHMENT_SIZE_BYTES {
            return Err(AppError::validation(format!(
                "attachment \"{filename}\" exceeds {MAX_ATTACHMENT_SIZE_BYTES} bytes"
            )));
        }
        total_size += data.len();

        let content_type = attachment.content_type.trim();
        let content_type = if content_type.is_empty() {
            DEFAULT_ATTACHMENT_CONTENT_TYPE
        } else {
            content_type
        };

        normalized.push(EmailAttachment::new(filename, content_type, data));
    }

    if total_size > MAX_TOTAL_ATTACHMENT_SIZE_BYTES {
        return Err(AppError::validation(format!(
            "attachments exceed total limit of {MAX_TOTAL_ATTACHMENT_SIZE_BYTES} bytes"
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::error::ErrorKind;

    fn attachment(filename: &str, content_type: &str, size: usize) -> EmailAttachment {
        EmailAttachment::new(filename, content_type, vec![0u8; size])
    }

    #[test]
    fn test_empty_list_passes_through() {
        let normalized =
            normalize_attachments(NotificationKind::Email, &[]).expect("empty list is fine");
        assert!(normalized.is_empty());
        // SMS without attachments is equally fine.
        assert!(normalize_attachments(NotificationKind::Sms, &[]).is_ok());
    }

    #[test]
    fn test_sms_with_attachments_is_rejected() {
        let err = normalize_attachments(NotificationKind::Sms, &[attachment("a.txt", "", 1)])
            .expect_err("sms cannot carry attachments");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_count_cap() {
        let many: Vec<_> = (0..11).map(|i| attachment(&format!("f{i}.txt"), "", 1)).collect();
        assert!(normalize_attachments(NotificationKind::Email, &many).is_err());

        let exactly_ten: Vec<_> =
            (0..10).map(|i| attachment(&format!("f{i}.txt"), "", 1)).collect();
        assert_eq!(
            normalize_attachments(NotificationKind::Email, &exactly_ten)
                .expect("ten is allowed")
                .len(),
            10
        );
    }

    #[test]
    fn test_filename_is_trimmed_and_required() {
        let normalized = normalize_attachments(
            NotificationKind::Email,
            &[attachment("  report.pdf  ", "application/pdf", 1)],
        )
        .expect("trimmed filename");
        assert_eq!(normalized[0].filename, "report.pdf");

        let err = normalize_attachments(NotificationKind::Email, &[attachment("   ", "", 1)])
            .expect_err("blank filename");
        assert!(err.message.contains("attachment 1"));
    }

    #[test]
    fn test_empty_payload_is_rejected() {
        let err = normalize_attachments(NotificationKind::Email, &[attachment("a.txt", "", 0)])
            .expect_err("empty payload");
        assert!(err.message.contains("empty data"));
    }

    #[test]
    fn test_per_file_cap_boundary() {
        // Exactly 5 MiB: accepted.
        let at_cap = attachment("cap.bin", "", MAX_ATTACHMENT_SIZE_BYTES);
        assert!(normalize_attachments(NotificationKind::Email, &[at_cap]).is_ok());

        // One byte over: rejected.
        let over = attachment("over.bin", "", MAX_ATTACHMENT_SIZE_BYTES + 1);
        let err = normalize_attachments(NotificationKind::Email, &[over])
            .expect_err("over per-file cap");
        assert!(err.message.contains("over.bin"));
    }

    #[test]
    fn test_aggregate_cap() {
        // Six files just under the per-file cap sum past 25 MiB.
        let files: Vec<_> = (0..6)
            .map(|i| attachment(&format!("f{i}.bin"), "", MAX_ATTACHMENT_SIZE_BYTES - 1))
            .collect();
        let err = normalize_attachments(NotificationKind::Email, &files)
            .expect_err("aggregate cap exceeded");
        assert!(err.message.contains("total limit"));
    }

    #[test]
    fn test_blank_content_type_gets_default() {
        let normalized = normalize_attachments(
            NotificationKind::Email,
            &[attachment("a.bin", "  ", 1), attachment("b.txt", "text/plain", 1)],
        )
        .expect("normalize");
        assert_eq!(normalized[0].content_type, DEFAULT_ATTACHMENT_CONTENT_TYPE);
        assert_eq!(normalized[1].content_type, "text/plain");
    }
}
