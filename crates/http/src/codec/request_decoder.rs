//! HTTP start line decoder
//!
//! The decoder only looks at the first line of the request. It locates the first
//! two space characters and cuts the line into method, path and version:
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//!    ^         ^
//!    first     second space
//! ```
//!
//! Anything after the start line (header fields, body) is left in the buffer and
//! ignored by the connection.
//!
//! # Truncated input
//!
//! The connection performs a single bounded read. When that read ends before the
//! line terminator, [`Decoder::decode_eof`] parses whatever arrived on a best-effort
//! basis: a request whose path was cut short still fails (no second space), one
//! whose version was cut short is accepted with the partial version token.

use crate::protocol::{ParseError, Request};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

/// Decoder turning raw bytes into a [`Request`].
#[derive(Debug, Default)]
pub struct RequestDecoder;

impl RequestDecoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Decoder for RequestDecoder {
    type Item = Request;
    type Error = ParseError;

    /// Decodes one start line if the buffer holds a complete one.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(request))`: the line was complete and valid, it is removed from `src`
    /// - `Ok(None)`: no line terminator yet
    /// - `Err(_)`: the line is complete but malformed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(line_end) = src.iter().position(|b| *b == b'\n') else {
            return Ok(None);
        };

        let line = src.split_to(line_end + 1);
        trace!(line_size = line.len(), "found request start line");
        parse_start_line(&line[..line_end]).map(Some)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(request) => Ok(Some(request)),
            None if buf.is_empty() => Ok(None),
            None => {
                let line = buf.split();
                trace!(line_size = line.len(), "decoding unterminated start line");
                parse_start_line(&line).map(Some)
            }
        }
    }
}

/// Splits `method SP path SP version` at the first two spaces.
///
/// A trailing `\r` is not part of the version.
fn parse_start_line(line: &[u8]) -> Result<Request, ParseError> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let line = std::str::from_utf8(line).map_err(|e| ParseError::invalid_start_line(format!("not utf-8: {e}")))?;

    let (method, rest) = line.split_once(' ').ok_or_else(|| ParseError::invalid_start_line("missing space after method"))?;
    let (path, version) = rest.split_once(' ').ok_or_else(|| ParseError::invalid_start_line("missing space after path"))?;

    Request::new(method, path, version)
}
