//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{AttachmentPayload, RescheduleRequest, SendNotificationRequest};
pub use response::{ListNotificationsResponse, NotificationResponse};
