//! DSA Dashboard Web Server
//!
//! Serves the problem tree, file contents and progress statistics to the dashboard UI.

use anyhow::Context;
use clap::Parser;
use dsadash_web::server::DashServerBuilder;
use dsadash_web::{init_logging, WebConfig};
use std::path::PathBuf;
use tracing::info;

/// DSA Dashboard Web Server - problem tree and progress statistics API
#[derive(Parser)]
#[command(name = "dsadash-web")]
#[command(about = "HTTP API for the DSA progress dashboard")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the markdown problem files
    #[arg(long)]
    root: Option<PathBuf>,

    /// Location of the statistics JSON file
    #[arg(long)]
    statistics: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Command line flags win over the environment
    fn apply(self, mut config: WebConfig) -> WebConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(root) = self.root {
            config.repository.root = root;
        }
        if let Some(statistics) = self.statistics {
            config.storage.statistics_path = statistics;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    init_logging(&args.log_level).context("Failed to set up logging")?;

    let config = args.apply(WebConfig::from_env().context("Failed to load configuration")?);

    info!(
        address = %config.address(),
        root = %config.repository.root.display(),
        statistics = %config.storage.statistics_path.display(),
        "Starting DSA Dashboard Web Server"
    );

    let server = DashServerBuilder::with_config(config)
        .build()
        .context("Failed to build server")?;

    server.start().await.context("Server failed")?;
    Ok(())
}
