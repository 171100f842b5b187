//! # courier-database
//!
//! SQLite persistence for Courier: connection pool management, migration
//! runner, and the notification repository. Every query maps its error into
//! [`courier_core::AppError`] before leaving this crate.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
