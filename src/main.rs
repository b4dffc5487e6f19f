//! RSVP Roster - Binary Entry Point

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rsvp_roster::api::{create_router, AppState};
use rsvp_roster::{Roster, RosterConfig};

type MainResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> MainResult<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RSVP_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RosterConfig::from_env()?;
    let roster = Arc::new(Roster::open(&config)?);
    match roster.file_path() {
        Some(path) => info!(path = %path.display(), capacity = config.capacity, "Opened roster"),
        None => info!(capacity = config.capacity, "Using in-memory roster"),
    }

    let state = Arc::new(AppState::new(roster).with_allowed_origins(config.allowed_origins.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "RSVP roster listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Ctrl-C received, shutting down");
    }
}
