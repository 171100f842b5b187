//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use courier_core::config::AppConfig;
use courier_database::DatabasePool;
use courier_service::NotificationService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheaply cloneable.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// SQLite connection pool, used directly by the health check.
    pub db: DatabasePool,
    /// Notification lifecycle service.
    pub notification_service: Arc<NotificationService>,
}
