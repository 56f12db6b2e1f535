use bytes::{BufMut, BytesMut};

const HTTP_VERSION: &str = "HTTP/1.0";

/// HTTP status codes the server can produce.
///
/// - `Ok` (200): static file or program output follows
/// - `Forbidden` (403): target exists but may not be read or run
/// - `NotFound` (404): target does not exist
/// - `InternalServerError` (500): program could not be started
/// - `NotImplemented` (501): any method other than GET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Reason phrase written on the status line.
    ///
    /// 404 keeps the lowercase "Not found" clients of this server expect.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// Status line plus header fields, serialized in insertion order.
///
/// Bodies are never held here: static files and program output are
/// streamed after the head is written. Field names are kept exactly as
/// given, so `Content-length` and `Content-Length` stay distinct on the wire.
///
/// ```ignore
/// let head = ResponseHead::new(StatusCode::Ok)
///     .header("Server", "Tiny Web Server")
///     .header("Content-type", "text/html")
///     .finish();
/// ```
#[derive(Debug, Clone)]
pub struct ResponseHead {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    /// Whether the blank line closing the header block is emitted
    pub terminated: bool,
}

impl ResponseHead {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            terminated: false,
        }
    }

    /// Appends a header field.
    pub fn header(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.headers.push((key.into(), value.to_string()));
        self
    }

    /// Closes the header block with an empty line.
    ///
    /// Left open for program output, which supplies the rest of the headers.
    pub fn finish(mut self) -> Self {
        self.terminated = true;
        self
    }

    pub fn status_line(&self) -> String {
        format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            self.status.as_u16(),
            self.status.reason_phrase()
        )
    }

    pub fn to_bytes(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(128);

        buf.put_slice(self.status_line().as_bytes());

        for (k, v) in &self.headers {
            buf.put_slice(k.as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(v.as_bytes());
            buf.put_slice(b"\r\n");
        }

        if self.terminated {
            buf.put_slice(b"\r\n");
        }

        buf
    }
}
