use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use tiny::config::Config;
use tiny::server;

/// Iterative HTTP/1.0 server for static files and CGI programs
#[derive(Debug, Parser)]
#[command(name = "tiny", version)]
struct Cli {
    /// Port to listen on
    port: u16,

    /// YAML file overriding the default settings
    #[arg(long, env = "TINY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|e| usage_exit(e));

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Arc::new(Config::load(cli.port, cli.config.as_deref()).await?);

    tokio::select! {
        res = server::listener::run(cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Bad arguments end the process with status 1; help and version output
/// keep clap's own behavior.
fn usage_exit(err: clap::Error) -> ! {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        err.exit();
    }
    let _ = err.print();
    std::process::exit(1);
}
