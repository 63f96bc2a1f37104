use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use score_api::config::Config;
use score_api::db::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting score api...");

    let config = Config::from_env()?;

    let store = Store::connect(&config.database_url).await?;
    store.migrate().await?;

    tracing::info!("Database connection established.");

    let app = score_api::app(&store.models());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
