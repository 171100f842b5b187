//! End-to-end lifecycle tests: submission pipeline and retry worker
//! operating on the same store, driven with synthetic clocks.

mod helpers;
mod lifecycle_test;
mod worker_flow_test;
