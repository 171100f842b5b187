//! # courier-worker
//!
//! The background retry worker. A single periodic loop selects retry
//! candidates from the store, applies the scheduled-for gate and the
//! exponential backoff schedule, redispatches through the shared dispatch
//! path, and records each outcome.

pub mod backoff;
pub mod runner;

pub use runner::RetryWorker;
