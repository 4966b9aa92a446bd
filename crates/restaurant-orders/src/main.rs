use actor_framework::tracing::setup_tracing;
use clap::Parser;
use restaurant_orders::config::Config;
use restaurant_orders::lifecycle::OrderSystem;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Restaurant order service.
#[derive(Parser, Debug)]
#[command(name = "restaurant-orders", version, about)]
struct Args {
    /// TOML configuration file. Built-in demo settings are used when omitted.
    #[arg(short, long, env = "RESTAURANT_CONFIG")]
    config: Option<PathBuf>,

    /// Overrides `server.port`.
    #[arg(short, long, env = "RESTAURANT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            Config::from_file(path).await?
        }
        None => {
            warn!("No configuration file given, using demo settings");
            Config::default()
        }
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let system = OrderSystem::start(&config).await?;
    let app = system.router();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_address).await?;
    info!("Restaurant order API listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => {
                    warn!(error = %e, "Failed to listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    system.shutdown().await?;
    Ok(())
}
