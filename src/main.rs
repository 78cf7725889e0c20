use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use genie_relay::config::{Cli, Config};
use genie_relay::relay::client::GroqClient;
use genie_relay::server::routes::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment.
    dotenv::dotenv().ok();

    // Parse CLI arguments.
    let cli = Cli::parse();

    // Initialize tracing/logging.
    let filter = if cli.verbose {
        "genie_relay=debug,tower_http=debug"
    } else {
        "genie_relay=info,tower_http=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_target(true)
        .init();

    info!("genie-relay v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from the environment.
    let config = Arc::new(Config::from_env()?);

    info!(
        base_url = config.groq_base_url,
        auth_configured = config.auth_secret.is_some(),
        "Configuration loaded"
    );

    // Build the upstream completion client.
    let relay = Arc::new(GroqClient::new(&config)?);

    // Build application state.
    let state = Arc::new(AppState { relay, config });

    // Build the HTTP router.
    let app = build_router(state);

    // Start the server.
    let listen_addr = cli.listen;
    info!(addr = listen_addr, "Starting server");

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Listening on {listen_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
