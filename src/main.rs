use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use courtbook_api::{config::ApiConfig, init_tracing, shutdown_signal};
use courtbook_db::{create_pool, schema::initialize_database, PgStore};
use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .wrap_err("Failed to connect to the database")?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Serve until Ctrl-C or SIGTERM
    let store = Arc::new(PgStore::new(db_pool.clone()));
    courtbook_api::start_server(config, store, shutdown_signal()).await?;

    db_pool.close().await;
    info!("Database pool closed");

    Ok(())
}
