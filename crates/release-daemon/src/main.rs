//! Release Manager daemon
//!
//! Serves the deploy and system version lookup API over HTTP.

use clap::Parser;
use release_daemon::config::LoggingConfig;
use release_daemon::error::DaemonResult;
use release_daemon::{DaemonConfig, DaemonError, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Release Manager daemon CLI
#[derive(Parser)]
#[command(name = "release-managerd")]
#[command(about = "Release Manager - fleet system version tracking", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "RELEASE_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "RELEASE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "RELEASE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "RELEASE_LOG_JSON")]
    json: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.level.clone().into());

    if logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    init_tracing(&config.logging);

    println!(
        r#"
  Release Manager
  Version: {}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr
    );

    let server = Server::new(config)?;
    server.run().await
}
