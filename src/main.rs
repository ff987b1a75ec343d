use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use thai_sentiment_api::api::{self, AppState};
use thai_sentiment_api::config::Config;
use thai_sentiment_api::sentiment::SentimentContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    // Everything shared across requests is loaded before the listener opens.
    let context = SentimentContext::load(&config)?;
    let state = Arc::new(AppState { context });

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
