use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plinth_api::config::ServerConfig;
use plinth_api::{background, bootstrap, router, state};
use plinth_events::{EmailConfig, EmailDelivery, EventBus, EventPersistence, Mailer};
use plinth_payments::{PaymentsClient, PaymentsConfig};
use plinth_storage::{StorageClient, StorageConfig};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plinth_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        exhibition = %config.exhibition.name,
        year = config.exhibition.year,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = plinth_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    plinth_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    plinth_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin bootstrap ---
    bootstrap::ensure_admin_user(&pool)
        .await
        .expect("Failed to bootstrap admin account");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // Spawn event persistence (writes all events to the database).
    let persistence_handle = tokio::spawn(EventPersistence::run(
        pool.clone(),
        event_bus.subscribe(),
    ));

    // Spawn the mailer when SMTP is configured; without it events are still
    // persisted, just not emailed.
    let mailer_cancel = tokio_util::sync::CancellationToken::new();
    let mailer_handle = match EmailConfig::from_env() {
        Some(email_config) => {
            let mailer = Mailer::new(
                pool.clone(),
                EmailDelivery::new(email_config),
                config.exhibition.name.clone(),
            );
            let receiver = event_bus.subscribe();
            let cancel = mailer_cancel.clone();
            tracing::info!("Mailer started");
            Some(tokio::spawn(async move {
                mailer.run(receiver, cancel).await;
            }))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, notification emails are disabled");
            None
        }
    };

    // Spawn expired-session cleanup.
    let cleanup_cancel = tokio_util::sync::CancellationToken::new();
    let cleanup_handle = tokio::spawn(background::session_cleanup::run(
        pool.clone(),
        cleanup_cancel.clone(),
    ));

    tracing::info!("Background services started");

    // --- Optional external services ---
    let storage = match StorageConfig::from_env() {
        Some(storage_config) => {
            let client = StorageClient::connect(&storage_config).await;
            tracing::info!(bucket = %storage_config.bucket, "Object storage client ready");
            Some(client)
        }
        None => {
            tracing::warn!("S3_BUCKET not set, image uploads are disabled");
            None
        }
    };

    let payments = match PaymentsConfig::from_env() {
        Some(payments_config) => {
            tracing::info!(base_url = %payments_config.base_url, "Payment gateway client ready");
            Some(PaymentsClient::new(&payments_config))
        }
        None => {
            tracing::warn!("PSP_API_KEY not set, online payment is disabled");
            None
        }
    };

    // --- App state + router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        storage,
        payments,
    };
    let app = router::build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the session cleanup loop.
    cleanup_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), cleanup_handle).await;

    // Stop the mailer before closing the bus so in-flight mail finishes.
    mailer_cancel.cancel();
    if let Some(handle) = mailer_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    // Drop the event bus sender to close the broadcast channel. This signals
    // event persistence to shut down once the backlog is written.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), persistence_handle).await;
    tracing::info!("Background services shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
