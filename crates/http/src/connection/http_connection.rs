use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use http::StatusCode;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio_util::codec::Decoder;
use tracing::{debug, trace, warn};

use crate::codec::RequestDecoder;
use crate::connection::MessageWriter;
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, Response, SendError};

/// Default size of the single request read, in bytes.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Stage a connection is in.
///
/// Every stage either moves forward or jumps to `Closed`; no stage is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Reading,
    Parsing,
    Routing,
    Writing,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Reading => "reading",
            ConnectionState::Parsing => "parsing",
            ConnectionState::Routing => "routing",
            ConnectionState::Writing => "writing",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Serves exactly one request on one connection, then closes it.
///
/// The request is taken from a single bounded read of at most `read_buffer_size`
/// bytes. Anything beyond that is not read; a start line cut by the bound is
/// decoded best-effort (see [`RequestDecoder`]).
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    writer: MessageWriter<W>,
    read_buf: BytesMut,
    read_buffer_size: usize,
    decoder: RequestDecoder,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    state: ConnectionState,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_capacity(reader, writer, DEFAULT_READ_BUFFER_SIZE)
    }

    pub fn with_capacity(reader: R, writer: W, read_buffer_size: usize) -> Self {
        Self {
            reader,
            writer: MessageWriter::with_capacity(writer, 256),
            read_buf: BytesMut::with_capacity(read_buffer_size),
            read_buffer_size,
            decoder: RequestDecoder::new(),
            read_timeout: None,
            write_timeout: None,
            state: ConnectionState::Reading,
        }
    }

    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Reads, routes and answers one request.
    ///
    /// Parse and handler failures are answered with an error status when the peer
    /// sent something answerable. The connection is closed on every path before this
    /// returns, the error only reports what went wrong.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let request = match self.read_request().await {
            Ok(request) => request,
            Err(e) => {
                if e.is_answerable() {
                    warn!(cause = %e, "malformed request, answering with 400");
                    if let Err(send_error) = self.send_response(Response::empty(StatusCode::BAD_REQUEST)).await {
                        debug!(cause = %send_error, "can't deliver error response");
                    }
                } else {
                    debug!(cause = %e, state = %self.state, "nothing to answer, closing connection");
                }
                self.close().await;
                return Err(e.into());
            }
        };

        self.transition(ConnectionState::Routing);
        let response = match handler.call(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(cause = %e, status = %e.status_code(), "handler failed");
                Response::empty(e.status_code())
            }
        };

        let result = self.send_response(response).await;
        self.close().await;
        result.map_err(HttpError::from)
    }

    async fn read_request(&mut self) -> Result<Request, ParseError> {
        self.transition(ConnectionState::Reading);

        let mut limited = (&mut self.reader).take(self.read_buffer_size as u64);
        let read = limited.read_buf(&mut self.read_buf);
        let size = match self.read_timeout {
            Some(timeout) => tokio::time::timeout(timeout, read).await.map_err(|_elapsed| ParseError::Timeout)??,
            None => read.await?,
        };
        trace!(size, "read request bytes");

        self.transition(ConnectionState::Parsing);
        match self.decoder.decode_eof(&mut self.read_buf)? {
            Some(request) => {
                debug!(method = request.method(), path = request.path(), "received request");
                Ok(request)
            }
            None => Err(ParseError::Empty),
        }
    }

    async fn send_response(&mut self, response: Response) -> Result<(), SendError> {
        self.transition(ConnectionState::Writing);

        let status = response.status();
        self.writer.write(response)?;
        let size = self.writer.buffered();

        let flush = self.writer.flush();
        match self.write_timeout {
            Some(timeout) => tokio::time::timeout(timeout, flush).await.map_err(|_elapsed| SendError::Timeout)??,
            None => flush.await?,
        }
        debug!(status = %status, size, "sent response");
        Ok(())
    }

    async fn close(&mut self) {
        // an unwritten response is abandoned, not retried
        self.writer.clear_buf();
        if let Err(e) = self.writer.shutdown().await {
            trace!(cause = %e, "shutdown connection error");
        }
        self.transition(ConnectionState::Closed);
    }

    fn transition(&mut self, state: ConnectionState) {
        trace!(from = %self.state, to = %state, "connection state");
        self.state = state;
    }
}
