//! HTTP API layer.
//!
//! Thin plumbing around the research service: routing, CORS, request
//! tracing, and the lazily-constructed process-wide service instance.

pub mod types;

mod formater;
mod research;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tokio::sync::OnceCell;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::service::ResearchService;

use types::HealthResponse;

/// Shared application state.
pub struct AppState {
    config: Config,
    service: OnceCell<Arc<ResearchService>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            service: OnceCell::new(),
        }
    }

    /// The process-wide research service, constructed on first use and
    /// reused for the remainder of the process lifetime.
    pub async fn service(&self) -> Arc<ResearchService> {
        self.service
            .get_or_init(|| async {
                tracing::info!("constructing research service");
                Arc::new(ResearchService::new(&self.config))
            })
            .await
            .clone()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/research/run", post(research::run))
        .route("/api/formater/generate", post(formater::generate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
