//! disnet Web Server
//!
//! Run with: cargo run -p disnet-web

use disnet_config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    disnet_web::telemetry::init(&config.logging.filter);

    info!("Starting Disease Network API v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.server.bind_address();
    let state = disnet_web::state::AppState::new(config);
    let store = state.store.clone();
    let source = state.source.clone();

    // Listen before the snapshot is ready; query routes answer 503 until then.
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let app = disnet_web::router::build_router(state);

    tokio::spawn(async move {
        match source.load().await {
            Ok(graph) => {
                store.replace(graph);
            }
            Err(e) => error!("Initial load from {:?} failed: {}", source.path(), e),
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
