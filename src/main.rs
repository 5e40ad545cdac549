use std::sync::Arc;

use movies_api::{AppState, config::Config, db, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movies_api=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(&config.database_url).await?;
    let state = Arc::new(AppState::new(config.clone(), db));

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(
        addr = %config.addr,
        poster_max_bytes = config.poster.max_bytes,
        "listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
