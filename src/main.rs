//! Navy Deco - Rust/Axum decompression table service
//!
//! Resolves single air dives against the US Navy Rev 7 air decompression
//! table. The table is loaded once at startup and never mutated.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
pub mod deco;
mod error;

use config::Config;
use deco::{DecoTable, Resolver};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "navy_deco_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Queries are never served against a missing table
    tracing::info!("Loading decompression table from {:?}", config.table_path);
    let table = DecoTable::load(&config.table_path).with_context(|| {
        format!(
            "could not load decompression table from {}",
            config.table_path.display()
        )
    })?;

    let config = Arc::new(config);
    let state = AppState {
        resolver: Resolver::new(Arc::new(table)),
        config: Arc::clone(&config),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/", get(root))
        .nest("/api/decompression", deco::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "table_entries": state.resolver.table().len(),
        "service": "navy-deco-web"
    }))
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Calculadora de Descompresión de Buceo API"
    }))
}
