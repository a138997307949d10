//! Server binary: loads settings, opens the pool, checks the database once, serves until signalled.

use clap::Parser;
use product_api::{
    app, connect_to_db, cors_layer, shutdown_signal, AppState, PgProductStore, ProductStore,
    Settings,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::parse();

    // Lazy so an unreachable database does not stop the server from starting.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_lazy(&settings.database_url)?;
    let store = PgProductStore::new(pool);

    if settings.clear {
        return match store.reset().await {
            Ok(()) => {
                tracing::info!("Database cleared successfully");
                store.close().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error clearing the database");
                store.close().await;
                Err(e.into())
            }
        };
    }

    connect_to_db(&store).await;

    let cors = settings.frontend_url.as_deref().map(cors_layer).transpose()?;
    let state = AppState::new(store.clone());
    let router = app(state, cors);

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    tracing::info!("Server is running on port {}", listener.local_addr()?.port());
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    Ok(())
}
