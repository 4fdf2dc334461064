//! Attune relay server.
//!
//! Run with: cargo run -p attune-web

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use attune_web::config::RelayConfig;
use attune_web::router::build_router;
use attune_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env();
    info!(model = %config.openai_model, port = config.port, "starting attune relay");

    let state = AppState::from_config(&config);
    state.store.initialize().await;
    info!(
        gateway_configured = state.gateway.is_configured(),
        audit_enabled = state.store.is_enabled(),
        "components wired"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_router(state);

    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
