use std::sync::Arc;

use backend::{telemetry, AppState, Config, MemoryStore, RedisStore, TaskStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();
    let config = Config::from_env()?;

    let store: Arc<dyn TaskStore> = match &config.redis_url {
        Some(url) => {
            tracing::info!(redis_url = %url, "using redis task store");
            Arc::new(RedisStore::open(url)?)
        }
        None => {
            tracing::info!("REDIS_URL not set, keeping tasks in memory");
            Arc::new(MemoryStore::default())
        }
    };

    let app = backend::app(AppState::new(store), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, static_dir = %config.static_dir.display(), "server running");
    axum::serve(listener, app).await?;
    Ok(())
}
