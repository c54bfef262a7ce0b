use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod db;
mod error;
mod models;
mod services;
mod store;

use config::AppConfig;
use services::catalog::CatalogBrowser;
use services::pexels::PexelsClient;
use services::tmdb::TmdbClient;

pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub tmdb: Arc<TmdbClient>,
    pub catalog: CatalogBrowser,
    pub pexels: Option<PexelsClient>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flixd=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::load();

    config.paths.ensure_dirs().await?;

    config.log_config();

    let database_url = config.database_url();
    tracing::debug!("Database URL: {}", database_url);

    let pool = db::connect(&database_url).await?;
    db::migrate(&pool).await?;

    let tmdb_api_key = config.tmdb_api_key.clone().context(
        "No TMDB API key configured; set TMDB_API_KEY or add tmdb_api_key to config.toml",
    )?;
    let tmdb = Arc::new(TmdbClient::new(tmdb_api_key));

    let pexels = config.pexels_api_key.clone().map(PexelsClient::new);

    let state = Arc::new(AppState {
        db: pool,
        catalog: CatalogBrowser::new(tmdb.clone()),
        tmdb,
        pexels,
    });

    // Root handler
    async fn root_handler() -> &'static str {
        "flixd"
    }

    // Build router
    let app = Router::new()
        .route("/", get(root_handler).head(root_handler))
        .route("/health", get(|| async { "OK" }))
        .merge(api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let ip: IpAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_address))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!("Starting server on {}", addr);

    // Create shutdown signal listener
    let shutdown_signal = async {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
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
            _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
            _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
        }
    };

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
