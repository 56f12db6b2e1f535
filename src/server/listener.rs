use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, cfg).await
}

/// Pause after a failed accept so a persistent error such as `EMFILE`
/// does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accepts connections forever, each one served to completion before the
/// next is taken.
pub async fn serve(listener: TcpListener, cfg: Arc<Config>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!(host = %peer.ip(), port = peer.port(), "Accepted connection");

        handle(socket, peer, Arc::clone(&cfg)).await;
    }
}

async fn handle(socket: TcpStream, peer: SocketAddr, cfg: Arc<Config>) {
    let mut conn = Connection::new(socket, cfg);

    if let Err(e) = conn.run().await {
        tracing::error!(%peer, "Connection error: {:#}", e);
    }

    let mut socket = conn.into_inner();
    if let Err(e) = socket.shutdown().await {
        tracing::debug!(error = %e, "Shutdown after response failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_backoff_pauses_without_stalling() {
        assert!(ACCEPT_BACKOFF > Duration::ZERO);
        assert!(ACCEPT_BACKOFF < Duration::from_secs(1));
    }
}
