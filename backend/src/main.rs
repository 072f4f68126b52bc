use sims_backend::config::ServerConfig;
use sims_backend::{create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let app_state = initialize_backend();
    let app = create_router(app_state, &config)?;

    info!("Starting SIMS server on http://{}", config.bind_addr);
    info!("Serving frontend from {}", config.static_dir.display());
    info!("API health check: http://{}/api/health", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
