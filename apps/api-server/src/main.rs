//! Plaza API Server binary.

use std::net::SocketAddr;

use api_server::{config::Config, create_app, create_state, init_tracing};
use event_store::SqliteEventStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting Plaza API Server");

    // Connect to the database and bootstrap the schema
    let store = SqliteEventStore::connect(&config.database_url).await?;

    // Create application state
    let state = create_state(&config, store);

    // Create application router
    let app = create_app(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
