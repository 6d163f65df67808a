//! HTTP API for minting tokens and listing wallet holdings

mod handlers;
mod responses;
mod routes;
mod upload;

pub use responses::{MessageResponse, MintResponse};
pub use routes::*;

use crate::config::{ApiConfig, MinterConfig};
use crate::core::ChainPort;
use crate::services::MintService;
use anyhow::Result;
use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Shared API state
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<MinterConfig>,
    pub mint_service: Arc<MintService>,
    pub chain: Arc<dyn ChainPort>,
}

impl ApiState {
    pub fn new(
        config: Arc<MinterConfig>,
        mint_service: Arc<MintService>,
        chain: Arc<dyn ChainPort>,
    ) -> Self {
        Self {
            config,
            mint_service,
            chain,
        }
    }
}

/// Start the API server
pub async fn start_server(
    state: ApiState,
    config: &ApiConfig,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("API server listening on {}", config.bind_address);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(handle)
}

/// Create the main API application
pub fn create_router(state: ApiState) -> Router {
    let body_limit = state.config.api.max_upload_size_mb * 1024 * 1024;
    let static_files = ServeDir::new(&state.config.api.static_dir);

    Router::new()
        .merge(create_mint_routes())
        .merge(create_holdings_routes())
        .route("/health", get(health_handler))
        .fallback_service(static_files)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}

/// Health check handler
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "service": "token-minter"
    }))
}
