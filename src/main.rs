use catalog_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment and logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    setup_environment(&config);

    tracing::info!("catalog server starting...");

    // 2. Initialize state (work dir, database, JWT, admin seed)
    let state = ServerState::initialize(&config).await?;

    // 3. Run the HTTP server until shutdown
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
