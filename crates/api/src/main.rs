use anyhow::Context;

use skuforge_api::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skuforge_observability::init();

    let config = ApiConfig::from_env();
    let app = skuforge_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
