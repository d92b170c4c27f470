use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use eventhub_api::config::ServerConfig;
use eventhub_api::router::build_app_router;
use eventhub_api::state::AppState;
use eventhub_db::PgStore;
use eventhub_events::delivery::http_client;
use eventhub_events::{HttpDirectory, HttpNotificationSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // `LOG_FORMAT=json` switches to one JSON object per line.
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "eventhub_api=debug,eventhub_events=debug,tower_http=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = eventhub_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    eventhub_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    eventhub_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    // --- Remote transports ---
    let client = http_client(eventhub_events::delivery::REQUEST_TIMEOUT)
        .context("Failed to build HTTP client")?;
    let directory =
        HttpDirectory::with_client(client.clone(), &config.notifications.directory_base_url);
    let sink = HttpNotificationSink::with_client(client, &config.notifications.sink_base_url);
    tracing::info!(
        directory = %config.notifications.directory_base_url,
        sink = %sink.endpoint(),
        dispatch_timeout_secs = config.notifications.dispatch_timeout.as_secs(),
        fanout_concurrency = config.notifications.fanout_concurrency,
        "Notification fan-out configured"
    );

    // --- App state ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState::new(
        config,
        Arc::new(PgStore::new(pool.clone())),
        Arc::new(directory),
        Arc::new(sink),
    );
    let dispatcher = state.dispatcher.clone();

    // --- Router ---
    let app = build_app_router(state)?;

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    let shutdown = Arc::new(Notify::new());
    let mut server = tokio::spawn({
        let shutdown = Arc::clone(&shutdown);
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .await
        }
    });

    tokio::select! {
        result = &mut server => {
            result?.context("Server error")?;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    // --- Drain ---
    shutdown.notify_one();
    match tokio::time::timeout(drain_timeout, server).await {
        Ok(result) => result?.context("Server error")?,
        Err(_) => tracing::warn!(
            timeout_secs = drain_timeout.as_secs(),
            "In-flight requests did not drain in time"
        ),
    }

    let stats = dispatcher.stats();
    tracing::info!(
        delivered = stats.delivered,
        failed = stats.failed,
        timed_out = stats.timed_out,
        "Notification dispatch totals"
    );

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
///
/// If a handler cannot be installed that branch never completes, so the
/// other signal still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
