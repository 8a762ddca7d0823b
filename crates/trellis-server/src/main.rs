use anyhow::{Context, Result};
use tracing::info;
use trellis_server::{app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::load_default()?;
    let state = AppState::from_config(&config).context("Invalid route table")?;
    info!(routes = state.router().routes().len(), "router ready");

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app(state)).await.context("Server error")?;
    Ok(())
}
