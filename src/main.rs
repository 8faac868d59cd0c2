// HTTP API server binary for the games catalog

use std::sync::Arc;

use anyhow::Result;
use game_catalog::api::{ApiServer, AppState};
use game_catalog::catalog::store::PgGameStore;
use game_catalog::ingest::feeds::FeedClient;
use game_catalog::util::db::Db;
use game_catalog::util::env as env_util;

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    tracing::info!("Initializing game-catalog API server");

    // Load dotenv/env once (safe to call multiple times)
    env_util::init_env();

    // Load configuration from environment
    let server = ApiServer::from_env()?;

    // Initialize database connection
    let database_url = env_util::db_url()?;
    let max_connections: u32 = env_util::env_parse("DB_MAX_CONNS", 10u32);
    let db = Db::connect(&database_url, max_connections).await?;

    tracing::info!("Database connected successfully");

    let state = AppState {
        db: db.clone(),
        store: Arc::new(PgGameStore::new(db)),
        feeds: FeedClient::from_env()?,
    };

    // Start HTTP server
    server.run(state).await?;

    Ok(())
}
