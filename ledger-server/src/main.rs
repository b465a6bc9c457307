use ledger_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    setup_environment()?;

    tracing::info!("Mostrador ledger server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. State: work dir, database, ledger engine
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
