//! Process entry point: parse CLI flags, assemble [`Config`], bootstrap
//! the store, and run the signaling accept loop.

use clap::Parser;
use parchment::config::Config;

/// Config values are read from the environment (§6.3); `--listen`
/// overrides `LISTEN_ADDR` when given.
#[derive(Parser, Debug)]
#[command(name = "parchment", about = "Virtual file system and WebRTC signaling relay")]
struct Cli {
    /// Override the WebSocket bind address (defaults to `LISTEN_ADDR` or `0.0.0.0:8080`).
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    parchment::run(config).await
}
