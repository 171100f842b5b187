//! Shared typed values used across Courier crates.

pub mod id;

pub use id::NotificationId;
