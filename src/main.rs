//! Research Agent - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the research API.

use research_agent::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research_agent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; missing credentials abort startup here.
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.default_model);

    api::serve(config).await?;

    Ok(())
}
