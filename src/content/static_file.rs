use std::path::PathBuf;

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWrite};

use crate::content::error_page::ClientError;
use crate::http::mime::content_type_for;
use crate::http::response::{ResponseHead, StatusCode};
use crate::http::writer::ResponseWriter;

/// A file opened for sending, sized by the earlier stat.
#[derive(Debug)]
pub struct StaticFile {
    path: PathBuf,
    file: File,
    size: u64,
}

impl StaticFile {
    /// Opens `file_path` before anything is written to the client.
    ///
    /// A file that disappeared or lost its permissions since it was checked
    /// is reported as not found.
    pub async fn open(file_path: &str, size: u64) -> Result<Self, ClientError> {
        match File::open(file_path).await {
            Ok(file) => Ok(Self {
                path: PathBuf::from(file_path),
                file,
                size,
            }),
            Err(e) => {
                tracing::warn!(path = file_path, error = %e, "File vanished after stat");
                Err(ClientError::not_found(file_path))
            }
        }
    }

    pub fn head(&self, server_name: &str) -> ResponseHead {
        ResponseHead::new(StatusCode::Ok)
            .header("Server", server_name)
            .header("Connection", "close")
            .header("Content-length", self.size)
            .header("Content-type", content_type_for(&self.path))
            .finish()
    }

    /// Writes the header block, then streams exactly `size` bytes of the
    /// file. Returns the number of body bytes sent.
    pub async fn send<W>(self, stream: &mut W, server_name: &str) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let head = self.head(server_name);
        ResponseWriter::new(&head)
            .write_to_stream(stream)
            .await
            .context("sending static headers")?;

        tracing::debug!(
            path = %self.path.display(),
            size = self.size,
            content_type = content_type_for(&self.path),
            "Response headers sent"
        );

        let mut body = self.file.take(self.size);
        let sent = tokio::io::copy(&mut body, stream)
            .await
            .context("sending static body")?;

        if sent < self.size {
            tracing::warn!(
                path = %self.path.display(),
                expected = self.size,
                sent,
                "File shrank while sending"
            );
        }

        Ok(sent)
    }
}
