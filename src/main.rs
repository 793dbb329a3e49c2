use parlance::api::{self, app_state::AppState};
use parlance::catalog::ResponseCatalog;
use parlance::config::loader::ConfigLoader;
use parlance::intent::IntentModel;
use parlance::observability::init_tracing;
use parlance::oracle::SerpApiOracle;
use parlance::router::ChatRouter;
use parlance::storage::create_history_repository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    let _log_guard = init_tracing(&config.logging)?;
    info!("Starting Parlance ({})...", config.environment);

    let model = Arc::new(IntentModel::train());
    info!(
        "Intent model trained: {} features, {} labels",
        model.vocabulary_size(),
        model.labels().count()
    );

    if config.search.api_key.is_empty() {
        warn!("SERPAPI_KEY is not set; link and question lookups will report not found");
    }
    let oracle = Arc::new(SerpApiOracle::new(&config.search)?);

    let history = create_history_repository(&config.history, &config.database).await?;
    info!("Chat history repository initialized ({})", config.history.backend);

    let router = ChatRouter::new(model, ResponseCatalog::default(), oracle, history.clone())?
        .with_oracle_timeout(Duration::from_secs(config.search.timeout_secs));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = api::create_router(AppState::new(router, history, config));
    info!("API router created");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
