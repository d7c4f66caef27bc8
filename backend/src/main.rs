use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use budget_tracker_backend::config::AppConfig;
use budget_tracker_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config)?;

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
