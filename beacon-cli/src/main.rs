mod logging;

use anyhow::{Context, Result};
use beacon_server::{RelayConfig, RelayServer};
use clap::{Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;
use tracing::info;

#[derive(Parser)]
#[command(name = "beacon", version, about = "WebRTC signaling relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay.
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:3000", env = "BEACON_ADDR")]
    addr: SocketAddr,

    /// HTTP path of the relay WebSocket
    #[arg(long, default_value = "/api/socket", env = "BEACON_SOCKET_PATH")]
    path: String,

    /// Capacity of the router command queue
    #[arg(long, default_value_t = 256, env = "BEACON_COMMAND_BUFFER")]
    command_buffer: usize,

    /// Do not answer CORS requests
    #[arg(long)]
    no_cors: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info", env = "BEACON_LOG_LEVEL")]
    log_level: String,

    /// Emit JSON log lines
    #[arg(long, env = "BEACON_LOG_JSON")]
    log_json: bool,
}

impl ServeArgs {
    fn relay_config(&self) -> RelayConfig {
        RelayConfig {
            bind_addr: self.addr,
            socket_path: self.path.clone(),
            command_buffer: self.command_buffer,
            allow_any_origin: !self.no_cors,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    logging::init_tracing(&logging::default_filter(&args.log_level), args.log_json);

    let config = args.relay_config();
    let server = RelayServer::bind(config.clone())
        .await
        .context("Failed to start relay")?;
    let addr = server.local_addr()?;

    println!("{}", "📡 beacon signaling relay".green().bold());
    println!("   🔌 ws://{}{}", addr, config.socket_path);
    println!("   🩺 http://{}/health", addr);

    server
        .run_until(shutdown_signal())
        .await
        .context("Relay server failed")?;

    println!("{}", "👋 Relay stopped".cyan());
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
