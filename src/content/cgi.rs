//! CGI-style program execution.
//!
//! The program runs with no arguments, the server's environment plus
//! `QUERY_STRING`, and its stdout relayed verbatim to the client after a
//! two-line partial header. The program writes the remaining headers and the
//! body itself.

use std::future::poll_fn;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::task::Poll;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};
use tokio::process::{Child, ChildStdout, Command};

use crate::content::error_page::ClientError;
use crate::http::response::{ResponseHead, StatusCode};
use crate::http::writer::ResponseWriter;

pub const QUERY_STRING: &str = "QUERY_STRING";

const BUFFER_SIZE: usize = 8192;

/// A started program whose output has not been collected yet.
#[derive(Debug)]
pub struct CgiProgram {
    path: PathBuf,
    child: Child,
    stdout: ChildStdout,
}

impl CgiProgram {
    /// Builds the command for `file_path` without starting it.
    pub fn command(file_path: &str, query: &str) -> Command {
        let mut cmd = Command::new(file_path);
        cmd.env(QUERY_STRING, query)
            .stdin(Stdio::null())
            .stdout(Stdio::piped());
        cmd
    }

    /// Starts the program. Nothing has been sent to the client yet, so a
    /// failure here can still be answered with a complete error response.
    pub fn spawn(file_path: &str, query: &str) -> Result<Self, ClientError> {
        let spawned = Self::command(file_path, query).spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                tracing::error!(path = file_path, error = %e, "Failed to start CGI program");
                return Err(ClientError::spawn_failed(file_path));
            }
        };

        let Some(stdout) = child.stdout.take() else {
            tracing::error!(path = file_path, "CGI program has no stdout pipe");
            return Err(ClientError::spawn_failed(file_path));
        };

        tracing::debug!(path = file_path, query, pid = child.id(), "CGI program started");

        Ok(Self {
            path: PathBuf::from(file_path),
            child,
            stdout,
        })
    }

    pub fn head(server_name: &str) -> ResponseHead {
        ResponseHead::new(StatusCode::Ok).header("Server", server_name)
    }

    /// Sends the partial header, then relays the program's output until the
    /// program exits.
    ///
    /// Output still buffered in the pipe at exit is forwarded, but the relay
    /// does not wait for EOF: a background process that inherited stdout
    /// would otherwise hold the connection open. The program is always
    /// waited on, even when the client has gone away mid-relay; in that case
    /// the pipe is closed first so the program sees a broken pipe instead of
    /// blocking.
    pub async fn relay<W>(self, stream: &mut W, server_name: &str) -> anyhow::Result<ExitStatus>
    where
        W: AsyncWrite + Unpin,
    {
        let Self {
            path,
            mut child,
            mut stdout,
        } = self;

        let mut exited = None;
        let relayed: anyhow::Result<u64> = async {
            ResponseWriter::new(&Self::head(server_name))
                .write_to_stream(stream)
                .await
                .context("sending CGI headers")?;

            let mut buf = vec![0u8; BUFFER_SIZE];
            let mut sent = 0u64;
            loop {
                tokio::select! {
                    read = stdout.read(&mut buf) => {
                        let n = read.context("reading CGI output")?;
                        if n == 0 {
                            break;
                        }
                        stream.write_all(&buf[..n]).await.context("relaying CGI output")?;
                        sent += n as u64;
                    }
                    status = child.wait() => {
                        exited = Some(status.with_context(|| format!("waiting for {}", path.display()))?);
                        sent += drain_ready(&mut stdout, &mut buf, stream).await?;
                        break;
                    }
                }
            }

            stream.flush().await.context("flushing CGI output")?;
            Ok(sent)
        }
        .await;
        drop(stdout);

        let status = match exited {
            Some(status) => status,
            None => child
                .wait()
                .await
                .with_context(|| format!("waiting for {}", path.display()))?,
        };

        let sent = relayed?;
        if status.success() {
            tracing::debug!(path = %path.display(), sent, "CGI program finished");
        } else {
            tracing::warn!(path = %path.display(), sent, %status, "CGI program exited abnormally");
        }

        Ok(status)
    }
}

/// Forwards whatever is already sitting in the pipe, stopping at EOF or at
/// the first read that would block.
async fn drain_ready<W>(stdout: &mut ChildStdout, buf: &mut [u8], stream: &mut W) -> anyhow::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut sent = 0u64;
    loop {
        let n = poll_fn(|cx| {
            let mut read_buf = ReadBuf::new(&mut *buf);
            match Pin::new(&mut *stdout).poll_read(cx, &mut read_buf) {
                Poll::Ready(Ok(())) => Poll::Ready(Ok(read_buf.filled().len())),
                Poll::Ready(Err(e)) => Poll::Ready(Err(e)),
                Poll::Pending => Poll::Ready(Ok(0)),
            }
        })
        .await
        .context("draining CGI output")?;

        if n == 0 {
            return Ok(sent);
        }
        stream.write_all(&buf[..n]).await.context("relaying CGI output")?;
        sent += n as u64;
    }
}
