use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::Config;
use crate::content::{CgiProgram, ClientError, FileMeta, StaticFile, Target, UriResolver, send_error};
use crate::http::reader::LineReader;
use crate::http::request::Request;

pub struct Connection<S> {
    reader: LineReader<S>,
    resolver: UriResolver,
    config: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitRequestLine,
    AwaitHeaders(Request),
    Resolve(Request),
    StatCheck(Target),
    ServeStatic(Target, FileMeta),
    ServeDynamic(Target),
    Error(ClientError),
    Done,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        Self {
            reader: LineReader::new(stream, config.limits.max_line_length),
            resolver: UriResolver::new(&config.content),
            config,
            state: ConnectionState::AwaitRequestLine,
        }
    }

    /// Serves the single request on this connection.
    ///
    /// Client-visible failures are answered with an error page and count as
    /// success here; `Err` means the connection itself broke.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Done);

            self.state = match state {
                ConnectionState::AwaitRequestLine => match self.reader.read_line().await? {
                    Some(line) => {
                        tracing::debug!(line = line.trim_end(), "Request line");
                        let request = Request::parse_line(&line);

                        if request.is_get() {
                            ConnectionState::AwaitHeaders(request)
                        } else {
                            ConnectionState::Error(ClientError::not_implemented(&request.method))
                        }
                    }
                    // Peer closed before sending anything
                    None => ConnectionState::Done,
                },

                ConnectionState::AwaitHeaders(request) => {
                    self.skip_headers().await?;
                    ConnectionState::Resolve(request)
                }

                ConnectionState::Resolve(request) => {
                    ConnectionState::StatCheck(self.resolver.resolve(&request.uri))
                }

                ConnectionState::StatCheck(target) => self.check(target).await,

                ConnectionState::ServeStatic(target, meta) => {
                    match StaticFile::open(&target.file_path, meta.size).await {
                        Ok(file) => {
                            file.send(self.reader.stream_mut(), &self.config.server.name)
                                .await?;
                            ConnectionState::Done
                        }
                        Err(e) => ConnectionState::Error(e),
                    }
                }

                ConnectionState::ServeDynamic(target) => {
                    match CgiProgram::spawn(&target.file_path, &target.query) {
                        Ok(program) => {
                            program
                                .relay(self.reader.stream_mut(), &self.config.server.name)
                                .await?;
                            ConnectionState::Done
                        }
                        Err(e) => ConnectionState::Error(e),
                    }
                }

                ConnectionState::Error(err) => {
                    tracing::warn!(
                        status = err.status.as_u16(),
                        cause = %err.cause,
                        "{}",
                        err.long_message
                    );
                    send_error(
                        self.reader.stream_mut(),
                        &err,
                        self.config.limits.max_body_length,
                    )
                    .await;
                    ConnectionState::Done
                }

                ConnectionState::Done => break,
            };
        }

        Ok(())
    }

    /// Reads and drops header lines up to the blank line that ends them.
    async fn skip_headers(&mut self) -> anyhow::Result<()> {
        while let Some(line) = self.reader.read_line().await? {
            if line == "\r\n" {
                return Ok(());
            }
            tracing::debug!(line = line.trim_end(), "Header");
        }

        tracing::debug!("Peer closed before end of headers");
        Ok(())
    }

    async fn check(&self, target: Target) -> ConnectionState {
        let Some(meta) = FileMeta::stat(target.path()).await else {
            return ConnectionState::Error(ClientError::not_found(&target.file_path));
        };

        if self.config.content.strict_root && !self.resolver.is_within_root(&target).await {
            return ConnectionState::Error(ClientError::outside_root(&target.file_path));
        }

        if target.is_static() {
            if !meta.can_serve() {
                return ConnectionState::Error(ClientError::unreadable(&target.file_path));
            }
            ConnectionState::ServeStatic(target, meta)
        } else {
            if !meta.can_run() {
                return ConnectionState::Error(ClientError::not_runnable(&target.file_path));
            }
            ConnectionState::ServeDynamic(target)
        }
    }

    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}
