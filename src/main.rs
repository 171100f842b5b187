//! Courier Server — durable notification dispatch service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use courier_api::{build_router, AppState};
use courier_core::config::AppConfig;
use courier_core::error::{AppError, ErrorKind};
use courier_database::repositories::NotificationRepository;
use courier_database::{migration, DatabasePool};
use courier_sender::{HttpSmsSender, SmsSender, SmtpEmailSender};
use courier_service::{NotificationService, TenantProfile};
use courier_worker::RetryWorker;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("COURIER_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Resolve the tenant profile from configuration.
///
/// The engine never sees raw credentials — only the constructed senders
/// and delivery limits. Missing SMS credentials leave the capability
/// absent, which disables SMS delivery for the tenant.
fn build_tenant_profile(config: &AppConfig) -> Result<TenantProfile, AppError> {
    let email_sender = Arc::new(SmtpEmailSender::new(
        &config.email,
        config.delivery.connection_timeout(),
    )?);

    let sms_sender: Option<Arc<dyn SmsSender>> = match &config.sms {
        Some(sms) if sms.is_complete() => Some(Arc::new(HttpSmsSender::new(
            sms,
            config.delivery.connection_timeout(),
            config.delivery.operation_timeout(),
        )?)),
        _ => {
            tracing::warn!("SMS delivery disabled: no SMS credentials configured");
            None
        }
    };

    Ok(TenantProfile::new(
        email_sender,
        sms_sender,
        config.delivery.clone(),
    ))
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    migration::run_migrations(db.pool()).await?;

    let repo = Arc::new(NotificationRepository::new(db.pool().clone()));
    let profile = Arc::new(build_tenant_profile(&config)?);
    let service = Arc::new(NotificationService::new(repo.clone(), profile.clone()));

    // Flipping the watch channel stops the worker loop and interrupts any
    // in-flight dispatch at its next await point.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker = RetryWorker::new(repo, profile);
    let worker_handle = tokio::spawn(async move { worker.run(shutdown_rx).await });

    let addr = config.server.bind_addr();
    let state = AppState {
        config: Arc::new(config),
        db: db.clone(),
        notification_service: service,
    };
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    tracing::info!(%addr, "Courier server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server crashed", e))?;

    let _ = shutdown_tx.send(true);
    let _ = worker_handle.await;
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
