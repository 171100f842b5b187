//! RFC 822 / MIME message composition for outgoing email.
//!
//! The on-wire format is a contract: headers in a fixed order, CRLF line
//! endings, a fixed multipart boundary, base64 attachment bodies, and a
//! closing terminator. Attachment filenames are sanitized against header
//! injection before emission.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use courier_entity::notification::EmailAttachment;

/// Fixed multipart/mixed boundary for attachment-bearing messages.
pub const MIXED_BOUNDARY: &str = "courier-mixed-boundary";

/// RFC 2045 maximum encoded line length.
const BASE64_LINE_WIDTH: usize = 76;

/// Compose the full message, headers included.
///
/// Without attachments the body is a single `text/plain` part; with
/// attachments the message is `multipart/mixed` with the text body first
/// and one base64 part per attachment, closed by `--boundary--`.
pub fn build_message(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
    attachments: &[EmailAttachment],
) -> String {
    let mut message = String::new();
    message.push_str(&format!("From: {from}\r\n"));
    message.push_str(&format!("To: {to}\r\n"));
    message.push_str(&format!("Subject: {subject}\r\n"));
    message.push_str("MIME-Version: 1.0\r\n");

    if attachments.is_empty() {
        message.push_str("Content-Type: text/plain; charset=\"utf-8\"\r\n");
        message.push_str("\r\n");
        message.push_str(body);
        return message;
    }

    message.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{MIXED_BOUNDARY}\"\r\n"
    ));
    message.push_str("\r\n");

    message.push_str(&format!("--{MIXED_BOUNDARY}\r\n"));
    message.push_str("Content-Type: text/plain; charset=\"utf-8\"\r\n");
    message.push_str("\r\n");
    message.push_str(body);
    message.push_str("\r\n");

    for attachment in attachments {
        let filename = sanitize_filename(&attachment.filename);
        message.push_str(&format!("--{MIXED_BOUNDARY}\r\n"));
        message.push_str(&format!("Content-Type: {}\r\n", attachment.content_type));
        message.push_str("Content-Transfer-Encoding: base64\r\n");
        message.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{filename}\"\r\n"
        ));
        message.push_str("\r\n");
        message.push_str(&encode_wrapped(&attachment.data));
        message.push_str("\r\n");
    }

    message.push_str(&format!("--{MIXED_BOUNDARY}--\r\n"));
    message
}

/// Strip CR, LF, and other control characters from a filename before it is
/// written into a header line.
pub fn sanitize_filename(filename: &str) -> String {
    filename.chars().filter(|c| !c.is_control()).collect()
}

/// Base64-encode and wrap at 76 columns with CRLF line breaks.
fn encode_wrapped(data: &[u8]) -> String {
    let encoded = BASE64.encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_WIDTH * 2);
    let bytes = encoded.as_bytes();
    for (index, chunk) in bytes.chunks(BASE64_LINE_WIDTH).enumerate() {
        if index > 0 {
            wrapped.push_str("\r\n");
        }
        // Base64 output is ASCII.
        wrapped.push_str(std::str::from_utf8(chunk).expect("base64 output is ascii"));
    }
    wrapped
}
