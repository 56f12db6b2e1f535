use bytes::{Buf, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::ResponseHead;

/// Pushes a serialized response head (and optionally a small inline body)
/// to the client, tracking how much has gone out.
pub struct ResponseWriter {
    buffer: BytesMut,
    written: usize,
}

impl ResponseWriter {
    pub fn new(head: &ResponseHead) -> Self {
        Self {
            buffer: head.to_bytes(),
            written: 0,
        }
    }

    /// Appends body bytes that go out right after the head.
    pub fn with_body(mut self, body: &[u8]) -> Self {
        self.buffer.extend_from_slice(body);
        self
    }

    /// Bytes handed to the stream so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.buffer.has_remaining() {
            let n = stream.write(self.buffer.chunk()).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.buffer.advance(n);
            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
