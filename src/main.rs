use anyhow::{Context, Result};
use portfolio_router::{config::Config, scheduler, server};
use std::net::SocketAddr;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_router=info".parse()?)
        )
        .init();

    info!("Starting portfolio router");

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;
    info!("Serving {} (studio subdomain: {})", config.site_origin, config.studio_subdomain);

    let http = reqwest::Client::builder()
        .user_agent(concat!("portfolio-router/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let state = server::AppState::new(config, http);

    // Pages still render without CMS content, so a failed first load is not fatal
    if state.reload_content().await.is_err() {
        warn!("Starting with empty content");
    }

    let mut jobs = scheduler::start_scheduler(state.clone()).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down scheduler");
    jobs.shutdown().await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
