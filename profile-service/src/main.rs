use profile_service::config::ProfileConfig;
use profile_service::services::init_metrics;
use profile_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics().map_err(|e| std::io::Error::other(format!("Metrics error: {}", e)))?;

    let config = ProfileConfig::load()
        .map_err(|e| std::io::Error::other(format!("Configuration error: {}", e)))?;

    init_tracing(
        "profile-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )
    .map_err(|e| std::io::Error::other(format!("Tracing initialization error: {}", e)))?;

    tracing::info!(
        environment = ?config.environment,
        store_backend = ?config.store.backend,
        cors_origins = ?config.cors.allowed_origins,
        "Starting profile-service"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "profile-service ready");

    app.run_until_stopped().await
}
