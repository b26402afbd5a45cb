// Main entry point - tracing, configuration and server startup
use activity_dashboard::app::build_app;
use activity_dashboard::infrastructure::config::load_config;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,activity_dashboard=debug")),
        )
        .init();

    let config = load_config()?;
    let router = build_app(&config)?;

    let addr: SocketAddr = config.server.bind_addr.parse()?;
    if config.server.debug_routes {
        tracing::warn!("Schema inspection routes are enabled");
    }
    tracing::info!(%addr, "Starting activity dashboard");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
