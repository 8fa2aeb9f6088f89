use anyhow::Context;
use staypark_api::{app, AppState};
use staypark_store::{app_config::Config, InMemoryDocumentStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "staypark_api=debug,staypark_admin=debug,staypark_store=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting StayPark admin API on port {}", config.server.port);

    let store = match &config.store.seed_file {
        Some(path) => InMemoryDocumentStore::from_fixture_file(path)
            .await
            .context("Failed to seed document store")?,
        None => InMemoryDocumentStore::new(),
    };

    let app = app(AppState::new(Arc::new(store), &config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
