//! Sponsorboard service binary - wires configuration, database, seed
//! accounts, and the HTTP API together.

use dotenvy::dotenv;
use sponsorboard::api::{AppState, create_router};
use sponsorboard::config;
use sponsorboard::errors::Result;
use std::env;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load the seed accounts configuration
    let accounts_config = config::accounts::load_default_config()
        .inspect_err(|e| error!("Failed to load accounts.toml: {}", e))?;

    // 4. Initialize database (backend selected by DATABASE_URL)
    let db = config::database::init_db()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed accounts (idempotent across restarts)
    config::accounts::seed_accounts(&db, &accounts_config)
        .await
        .inspect_err(|e| error!("Failed to seed accounts: {}", e))?;

    // 6. Serve the API
    let host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("API_PORT").unwrap_or_else(|_| "8080".to_string());
    let address = format!("{host}:{port}");

    let app = create_router(AppState::new(db));
    let listener = TcpListener::bind(&address).await?;
    info!("Sponsorboard API listening on {address}");

    axum::serve(listener, app).await?;

    Ok(())
}
