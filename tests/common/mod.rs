#![allow(dead_code)]

use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use tiny::config::Config;
use tiny::http::connection::Connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A temporary document root with a config pointing at it.
pub struct Site {
    pub dir: TempDir,
    pub config: Config,
}

impl Site {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.content.doc_root = dir.path().to_string_lossy().into_owned();

        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Full path string the server reports for `uri`.
    pub fn file_path(&self, uri: &str) -> String {
        format!("{}{}", self.config.content.doc_root, uri)
    }

    pub fn write(&self, rel: &str, contents: impl AsRef<[u8]>, mode: u32) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(mode)).unwrap();
    }

    pub async fn request(&self, raw: &[u8]) -> Vec<u8> {
        exchange(self.config.clone(), raw).await
    }
}

/// Sends `raw` over an in-memory connection, runs the dispatcher on the
/// other end and returns everything written back.
pub async fn exchange(config: Config, raw: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(16 * 1024);
    client.write_all(raw).await.unwrap();
    client.shutdown().await.unwrap();

    let serve = async move {
        let mut conn = Connection::new(server, Arc::new(config));
        conn.run().await.unwrap();
    };
    let read = async {
        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        out
    };

    let ((), out) = tokio::join!(serve, read);
    out
}

/// Splits a response at the blank line ending its header block.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no end of headers");

    (
        String::from_utf8_lossy(&raw[..end + 4]).into_owned(),
        raw[end + 4..].to_vec(),
    )
}

pub fn status_line(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    text.lines().next().unwrap_or_default().to_string()
}
