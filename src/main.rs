//! Book API Server
//!
//! REST server exposing CRUD operations over book records.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookapi_server::{api, config::AppConfig, repository::Repository, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bookapi_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Book API Server v{}", env!("CARGO_PKG_VERSION"));

    let repository = Repository::connect(&config.database).await?;
    if let Err(e) = repository.books.ping().await {
        // The driver reconnects on demand; report and keep serving
        tracing::warn!("Record store not reachable yet: {}", e);
    } else {
        tracing::info!("Connected to record store");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, repository);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
