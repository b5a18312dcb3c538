use std::sync::Arc;

use anyhow::Context;

use pharmacy_api::config::ApiConfig;
use pharmacy_inventory::{InMemoryInventoryStore, InventoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pharmacy_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    // Process-lifetime storage: records are lost on restart.
    let store: Arc<dyn InventoryStore> = Arc::new(InMemoryInventoryStore::new());
    let app = pharmacy_api::app::build_app(store);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
