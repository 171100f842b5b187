//! Resolved tenant profile injected into the engine.

use std::sync::Arc;

use courier_core::config::DeliveryConfig;
use courier_sender::{EmailSender, SmsSender};

/// The resolved bundle of sender capabilities and delivery limits for one
/// tenant.
///
/// Immutable once constructed; the submission pipeline and the retry
/// worker only ever see this resolved value, never raw credentials.
/// An absent SMS sender means SMS is disabled for the tenant.
#[derive(Debug, Clone)]
pub struct TenantProfile {
    /// Email dispatch capability.
    pub email_sender: Arc<dyn EmailSender>,
    /// SMS dispatch capability, when the tenant has one configured.
    pub sms_sender: Option<Arc<dyn SmsSender>>,
    /// Retry policy and provider timeouts.
    pub delivery: DeliveryConfig,
}

impl TenantProfile {
    /// Assemble a profile from its parts.
    pub fn new(
        email_sender: Arc<dyn EmailSender>,
        sms_sender: Option<Arc<dyn SmsSender>>,
        delivery: DeliveryConfig,
    ) -> Self {
        Self {
            email_sender,
            sms_sender,
            delivery,
        }
    }

    /// Whether SMS delivery is available for this tenant.
    pub fn sms_enabled(&self) -> bool {
        self.sms_sender.is_some()
    }
}
