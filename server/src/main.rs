use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use todoman_backend::{Config, MongoStore, TodoService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let store = MongoStore::connect(&config.mongodb_uri, &config.mongodb_db)
        .await
        .with_context(|| format!("connecting to mongodb database {:?}", config.mongodb_db))?;
    let service = TodoService::new(Arc::new(store));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("api-server listening on port {}", config.port);

    todoman_backend::run(listener, service).await?;
    Ok(())
}
