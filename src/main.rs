use anyhow::{Context, Result};
use i18n_routing::{config, server};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_routing=info".parse()?)
        )
        .init();

    info!("Starting i18n routing server");

    // Load configuration from environment
    let config = config::Config::from_env()?;

    let router = server::build_router(&config)?;
    match router.default_locale() {
        Some(locale) => info!("Default locale: {}", locale),
        None => info!("No default locale configured"),
    }

    let app = server::app(Arc::new(router));
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
