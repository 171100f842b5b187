//! Recording stub senders for tests.
//!
//! Enabled by the `testing` feature; used by the service, worker, and
//! integration test suites so retry scenarios can script provider
//! failures without network I/O.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_entity::notification::EmailAttachment;

use crate::traits::{EmailSender, SmsSender};

/// One observed email send.
#[derive(Debug, Clone)]
pub struct RecordedEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachment_count: usize,
}

/// One observed SMS send.
#[derive(Debug, Clone)]
pub struct RecordedSms {
    pub recipient: String,
    pub body: String,
}

/// Email stub that records calls and fails on request.
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    failures_remaining: AtomicU32,
    calls: Mutex<Vec<RecordedEmail>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` sends fail before succeeding again.
    pub fn fail_next(&self, n: u32) {
        self.failures_remaining.store(n, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("lock").len()
    }

    pub fn calls(&self) -> Vec<RecordedEmail> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        attachments: &[EmailAttachment],
    ) -> AppResult<()> {
        self.calls.lock().expect("lock").push(RecordedEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            attachment_count: attachments.len(),
        });

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::dispatch("scripted email failure"));
        }
        Ok(())
    }
}

/// SMS stub that records calls, fails on request, and returns a fixed
/// provider message id on success.
#[derive(Debug)]
pub struct RecordingSmsSender {
    failures_remaining: AtomicU32,
    provider_message_id: String,
    calls: Mutex<Vec<RecordedSms>>,
}

impl Default for RecordingSmsSender {
    fn default() -> Self {
        Self {
            failures_remaining: AtomicU32::new(0),
            provider_message_id: "SM-stub-0001".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider_message_id(id: impl Into<String>) -> Self {
        Self {
            provider_message_id: id.into(),
            ..Self::default()
        }
    }

    /// Make the next `n` sends fail before succeeding again.
    pub fn fail_next(&self, n: u32) {
        self.failures_remaining.store(n, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("lock").len()
    }

    pub fn calls(&self) -> Vec<RecordedSms> {
        self.calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send(&self, recipient: &str, body: &str) -> AppResult<String> {
        self.calls.lock().expect("lock").push(RecordedSms {
            recipient: recipient.to_string(),
            body: body.to_string(),
        });

        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::dispatch("scripted sms failure"));
        }
        Ok(self.provider_message_id.clone())
    }
}
