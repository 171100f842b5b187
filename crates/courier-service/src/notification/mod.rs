//! Notification engine modules.

pub mod attachments;
pub mod dispatch;
pub mod request;
pub mod service;
pub mod validate;

pub use request::NotificationRequest;
pub use service::NotificationService;
