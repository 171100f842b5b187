//! # courier-service
//!
//! The notification lifecycle engine: request validation, attachment
//! normalization, the submission pipeline, status queries, and the
//! queued-only mutation surface. The retry worker in `courier-worker`
//! shares this crate's dispatch path so submission and retries stay
//! behaviorally identical.

pub mod context;
pub mod notification;

pub use context::TenantProfile;
pub use notification::service::NotificationService;
