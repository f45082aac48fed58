use anyhow::Context;
use campus_connect::config::AppConfig;
use campus_connect::server::{self, ServiceRepository};
use campus_connect::utils::{logger, validation::Validate};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "catalog-server")]
#[command(about = "Campus Connect catalog API")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override server.host from config
    #[arg(long)]
    host: Option<String>,

    /// Override server.port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Start with an empty datastore
    #[arg(long)]
    no_seed: bool,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => AppConfig::default(),
    };

    // 應用命令列覆蓋設定
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.no_seed {
        config.server.seed_sample_data = false;
    }
    if args.json_logs {
        config.logging.json = true;
    }

    logger::init_server_logger(config.logging.json);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let repository = if config.server.seed_sample_data {
        ServiceRepository::seeded()
    } else {
        ServiceRepository::new()
    };
    tracing::info!("📦 Datastore ready with {} services", repository.len().await);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    server::run(listener, Arc::new(repository), shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}
