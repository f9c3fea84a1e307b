use crate::codec::ResponseEncoder;
use crate::protocol::{Response, SendError};
use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;

/// Buffers encoded responses and writes them out in full.
#[derive(Debug)]
pub struct MessageWriter<W> {
    writer: W,
    buffer: BytesMut,
    encoder: ResponseEncoder,
}

impl<W> MessageWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), encoder: ResponseEncoder::new() }
    }

    #[cfg(test)]
    fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Number of encoded bytes waiting to be flushed.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Drops encoded bytes that were not written yet.
    pub fn clear_buf(&mut self) {
        self.buffer.clear();
    }

    #[inline]
    pub fn write(&mut self, response: Response) -> Result<(), SendError> {
        self.encoder.encode(response, &mut self.buffer)
    }

    /// Writes every buffered byte, looping over partial writes.
    pub async fn flush(&mut self) -> Result<(), SendError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        self.writer.write_all(self.buffer.as_ref()).await?;
        self.buffer.clear();
        Ok(self.writer.flush().await?)
    }

    /// Flushes and shuts down the write side.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        self.flush().await?;
        Ok(self.writer.shutdown().await?)
    }
}
