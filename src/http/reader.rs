use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Line-oriented reader over a client connection.
///
/// Wraps the stream in a [`BufReader`] so request lines can be pulled one at
/// a time. Responses bypass the buffer through [`LineReader::stream_mut`].
pub struct LineReader<S> {
    inner: BufReader<S>,
    max_line_length: usize,
}

impl<S> LineReader<S>
where
    S: AsyncRead + Unpin,
{
    pub fn new(stream: S, max_line_length: usize) -> Self {
        Self {
            inner: BufReader::new(stream),
            max_line_length: max_line_length.max(2),
        }
    }

    /// Reads one line, terminator included.
    ///
    /// At most `max_line_length - 1` bytes are taken per call; a longer line
    /// is handed back in pieces, the remainder arriving on the next call.
    /// Returns `None` once the peer has closed and nothing is left. Bytes
    /// that are not UTF-8 become U+FFFD, so such a URI names a file that
    /// does not exist.
    pub async fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut buf = Vec::new();
        let limit = (self.max_line_length - 1) as u64;

        let n = (&mut self.inner).take(limit).read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Underlying stream; responses are written here directly.
    pub fn stream_mut(&mut self) -> &mut S {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}
