use anyhow::Context;
use cart_items_rust::cart::{AppState, InMemoryCartItemStore, MongoCartItemStore};
use cart_items_rust::config::{Config, StoreKind};
use cart_items_rust::logging;
use cart_items_rust::router::create_app_router;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing `.env` is fine; the environment and flags still apply.
    let _ = dotenvy::dotenv();

    logging::init().context("initialize logging")?;

    let config = Config::from_args();

    // Initialize application state
    let state = match config.store {
        StoreKind::Mongo => {
            let store =
                MongoCartItemStore::connect(&config.mongodb_uri, &config.database, &config.collection)
                    .await
                    .context("connect to MongoDB")?;
            AppState::new(store)
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; cart items are lost on exit");
            AppState::new(InMemoryCartItemStore::new())
        }
    };

    // Build application router with all routes and middleware
    let app = create_app_router(Arc::new(state));

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    tracing::info!("Server running on http://{}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
