use anyhow::Result;
use tracing::info;
use wonderland::{app_state::AppState, config::Config, router::build_router, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format());

    if config.search_api_key().is_none() {
        tracing::warn!("SEARCH_API_KEY is not set; /api/news and /api/feed will fail");
    }

    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        addr = %listener.local_addr()?,
        origins = ?config.allowed_origins(),
        "Article server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutting down");
}
