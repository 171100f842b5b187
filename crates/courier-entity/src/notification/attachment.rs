//! Email attachment value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single email attachment: filename, MIME content type, and raw bytes.
///
/// Attachments only exist on email notifications; the normalizer in the
/// service layer enforces the count and size bounds before one of these is
/// ever persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAttachment {
    /// Filename presented to the recipient. Trimmed, never empty.
    pub filename: String,
    /// MIME content type. Defaults to `application/octet-stream`.
    pub content_type: String,
    /// Raw payload bytes.
    pub data: Vec<u8>,
}

impl EmailAttachment {
    /// Construct an attachment from its parts.
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

// Manual Debug: payloads can be megabytes, print the length instead.
impl fmt::Debug for EmailAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailAttachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_omits_payload_bytes() {
        let attachment = EmailAttachment::new("report.pdf", "application/pdf", vec![0u8; 64]);
        let rendered = format!("{attachment:?}");
        assert!(rendered.contains("data_len: 64"));
        assert!(!rendered.contains("0, 0, 0"));
    }
}
