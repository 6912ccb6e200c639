use std::sync::Arc;
use tracing::info;

use pilot_server::{api, config::Config, orchestrator::Orchestrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!("Starting query assistant");

    let orchestrator = Arc::new(Orchestrator::new(&config)?);
    info!("LLM and mail clients initialised");

    let routes = api::routes(orchestrator);

    let addr = config.bind_addr()?;
    let (bound, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    })?;
    info!("Server listening on {}", bound);

    server.await;
    info!("Server stopped");
    Ok(())
}
