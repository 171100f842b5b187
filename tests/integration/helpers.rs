//! Shared fixtures for the integration suite.

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use courier_core::config::DeliveryConfig;
use courier_database::repositories::NotificationRepository;
use courier_sender::testing::{RecordingEmailSender, RecordingSmsSender};
use courier_sender::SmsSender;
use courier_service::{NotificationService, TenantProfile};
use courier_worker::RetryWorker;

/// A fully wired engine over an in-memory store with recording senders.
pub struct TestEngine {
    pub service: NotificationService,
    pub worker: RetryWorker,
    pub repo: Arc<NotificationRepository>,
    pub email: Arc<RecordingEmailSender>,
    pub sms: Arc<RecordingSmsSender>,
}

/// Delivery limits used across the suite: 1s base interval, 5 attempts.
pub fn delivery_config() -> DeliveryConfig {
    DeliveryConfig {
        max_retries: 5,
        retry_interval_sec: 1,
        connection_timeout_sec: 1,
        operation_timeout_sec: 5,
    }
}

pub async fn engine(sms_enabled: bool) -> TestEngine {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    courier_database::migration::run_migrations(&pool)
        .await
        .expect("run migrations");

    let repo = Arc::new(NotificationRepository::new(pool));
    let email = Arc::new(RecordingEmailSender::new());
    let sms = Arc::new(RecordingSmsSender::with_provider_message_id("SM-e2e"));
    let profile = Arc::new(TenantProfile::new(
        email.clone(),
        sms_enabled.then(|| sms.clone() as Arc<dyn SmsSender>),
        delivery_config(),
    ));

    TestEngine {
        service: NotificationService::new(repo.clone(), profile.clone()),
        worker: RetryWorker::new(repo.clone(), profile),
        repo,
        email,
        sms,
    }
}
