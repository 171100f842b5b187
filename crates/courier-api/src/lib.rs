//! # courier-api
//!
//! The authenticated HTTP surface for Courier. Routes, bearer-token
//! middleware, request/response DTOs, and the error-to-status mapping live
//! here; all lifecycle behavior stays in `courier-service`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
