//! HTML error responses.

use tokio::io::AsyncWrite;

use crate::http::response::{ResponseHead, StatusCode};
use crate::http::writer::ResponseWriter;

/// A failure the client is told about with a complete error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub status: StatusCode,
    /// What the failure is about: the offending method or file name
    pub cause: String,
    /// Sentence shown in front of the cause
    pub long_message: &'static str,
}

impl ClientError {
    pub fn new(status: StatusCode, cause: impl Into<String>, long_message: &'static str) -> Self {
        Self {
            status,
            cause: cause.into(),
            long_message,
        }
    }

    pub fn not_implemented(method: &str) -> Self {
        Self::new(
            StatusCode::NotImplemented,
            method,
            "Tiny does not implement this method",
        )
    }

    pub fn not_found(file_path: &str) -> Self {
        Self::new(StatusCode::NotFound, file_path, "Tiny couldn't find this file")
    }

    pub fn unreadable(file_path: &str) -> Self {
        Self::new(StatusCode::Forbidden, file_path, "Tiny couldn't read the file")
    }

    pub fn not_runnable(file_path: &str) -> Self {
        Self::new(
            StatusCode::Forbidden,
            file_path,
            "Tiny couldn't run the CGI program",
        )
    }

    pub fn outside_root(file_path: &str) -> Self {
        Self::new(
            StatusCode::Forbidden,
            file_path,
            "Tiny refuses to serve outside the document root",
        )
    }

    pub fn spawn_failed(file_path: &str) -> Self {
        Self::new(
            StatusCode::InternalServerError,
            file_path,
            "Tiny couldn't run the CGI program",
        )
    }

    /// HTML page describing the error, cut to at most `max_len` bytes.
    pub fn body(&self, max_len: usize) -> String {
        let mut body = format!(
            "<html><title>Tiny web server Error</title><body bgcolor=ffffff>\r\n\
             {}: {}\r\n\
             {}: {}\r\n",
            self.status.as_u16(),
            self.status.reason_phrase(),
            self.long_message,
            self.cause,
        );

        if body.len() > max_len {
            let mut end = max_len;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
        }

        body
    }
}

/// Sends `err` as a full response: status line, `Content-Type`,
/// `Content-Length`, then the HTML body.
///
/// A failed write ends the attempt quietly; the connection is closed by the
/// caller either way.
pub async fn send_error<W>(stream: &mut W, err: &ClientError, max_body_length: usize)
where
    W: AsyncWrite + Unpin,
{
    let body = err.body(max_body_length);
    let head = ResponseHead::new(err.status)
        .header("Content-Type", "text/html")
        .header("Content-Length", body.len())
        .finish();

    let mut writer = ResponseWriter::new(&head).with_body(body.as_bytes());
    if let Err(e) = writer.write_to_stream(stream).await {
        tracing::debug!(
            status = err.status.as_u16(),
            written = writer.written(),
            error = %e,
            "Error response cut short"
        );
    }
}
