/// The request line of an HTTP/1.0 request.
///
/// Parsed once from the first line of the stream. Header lines that follow
/// are consumed but never stored, since nothing in the server interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Method token exactly as sent (e.g. "GET", "post")
    pub method: String,
    /// Request target (e.g. "/index.html", "/cgi-bin/adder?1&2")
    pub uri: String,
    /// Protocol version token (typically "HTTP/1.0")
    pub version: String,
}

impl Request {
    /// Splits a request line into method, uri and version.
    ///
    /// Tokens are separated by any run of ASCII whitespace and the line
    /// terminator is ignored. Missing tokens come back empty rather than as
    /// an error, so a garbage line still yields a request whose method is
    /// rejected later.
    ///
    /// # Example
    ///
    /// ```
    /// # use tiny::http::request::Request;
    /// let req = Request::parse_line("GET /index.html HTTP/1.0\r\n");
    /// assert_eq!(req.uri, "/index.html");
    /// assert!(req.is_get());
    /// ```
    pub fn parse_line(line: &str) -> Self {
        let mut parts = line.split_ascii_whitespace();
        let mut next = || parts.next().unwrap_or_default().to_string();

        let method = next();
        let uri = next();
        let version = next();

        Self { method, uri, version }
    }

    /// GET is the only supported method; the comparison ignores case.
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}
