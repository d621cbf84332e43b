use anyhow::Context;

use notes_api_rust::{app, config, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = config::config().clone();
    config.validate()?;
    tracing::info!(
        "Starting Notes API in {:?} mode with {:?} store",
        config.environment,
        config.database.backend
    );
    if config.security.token_expiry_hours.is_none() {
        tracing::warn!("Session tokens are issued without expiry");
    }

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config)
        .await
        .context("failed to initialize application state")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Notes API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
