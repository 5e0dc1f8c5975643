use std::path::PathBuf;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use websockify::{Server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "websockify", version, about = "WebSocket to TCP relay")]
struct Opts {
    /// Host:port to listen on
    #[arg(long, default_value = "0.0.0.0:6080")]
    listen: String,

    /// Host:port to connect to
    #[arg(long, default_value = "localhost:5900")]
    target: String,

    /// Path to web files (omit for no static files)
    #[arg(long)]
    web_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("websockify=info")),
        )
        .compact()
        .init();

    let mut config = ServerConfig::new(opts.listen, opts.target);
    if let Some(web_root) = opts.web_root {
        config = config.with_web_root(web_root);
    }

    let lifetime = CancellationToken::new();
    let shutdown = lifetime.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for shutdown signal: {}", e);
            return;
        }
        tracing::info!("shutdown signal received");
        shutdown.cancel();
    });

    Server::new(config).serve(lifetime).await?;
    Ok(())
}
