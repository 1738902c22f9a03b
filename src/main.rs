use incident_quiz::{
    api::{build_router, AppState},
    config::Config,
    quiz::QuizEngine,
    state::SelectionStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "incident_quiz={},tower_http={}",
            config.observability.log_level, config.observability.log_level
        )
        .into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        service = %config.observability.service_name,
        "Starting Incident Quiz v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Artifacts are required; any load failure aborts startup
    let engine = match QuizEngine::load(&config.artifacts) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load artifacts");
            return Err(e.into());
        }
    };
    let model = engine.model();
    tracing::info!(
        model = %model.name,
        model_type = %model.model_type,
        trained_at = ?model.trained_at,
        records = engine.dataset().len(),
        "✅ Artifacts loaded"
    );

    let selections = SelectionStore::from_config(&config.selection);
    tracing::info!(
        ttl_secs = config.selection.ttl_secs,
        max_active = config.selection.max_active,
        "✅ Selection store initialized"
    );

    let app_state = AppState::new(engine, selections)
        .with_request_timeout(Duration::from_secs(config.server.request_timeout_secs));
    let app = build_router(app_state);

    let http_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("🚀 Quiz listening on http://{}", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
