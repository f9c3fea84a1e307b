//! HTTP response encoder
//!
//! Serializes a [`Response`] as
//!
//! ```text
//! HTTP/1.1 <code> <reason>\r\n
//! <name>: <value>\r\n        (once per header field, in insertion order)
//! \r\n
//! <body>
//! ```
//!
//! Exactly the serialized bytes are produced, nothing is padded.

use crate::protocol::{Response, SendError};
use bytes::{BufMut, BytesMut};
use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size reserved for the status line and header fields
const INIT_HEADER_SIZE: usize = 256;

#[derive(Debug, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, headers, body) = item.into_parts();

        dst.reserve(INIT_HEADER_SIZE + body.len());
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or_default())?;

        for (name, value) in headers.iter() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        dst.put_slice(&body);
        Ok(())
    }
}

/// Writer adapter so `write!` can format straight into a `BytesMut`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn encode(response: Response) -> BytesMut {
        let mut dst = BytesMut::new();
        ResponseEncoder.encode(response, &mut dst).unwrap();
        dst
    }

    #[test]
    fn text_response() {
        let dst = encode(Response::text(StatusCode::OK, "abc"));
        assert_eq!(&dst[..], &b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"[..]);
    }

    #[test]
    fn empty_responses() {
        assert_eq!(&encode(Response::empty(StatusCode::OK))[..], &b"HTTP/1.1 200 OK\r\n\r\n"[..]);
        assert_eq!(&encode(Response::empty(StatusCode::NOT_FOUND))[..], &b"HTTP/1.1 404 Not Found\r\n\r\n"[..]);
        assert_eq!(&encode(Response::empty(StatusCode::BAD_REQUEST))[..], &b"HTTP/1.1 400 Bad Request\r\n\r\n"[..]);
    }

    #[test]
    fn exact_length() {
        let body = "x".repeat(1000);
        let dst = encode(Response::text(StatusCode::OK, body));

        let head = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 1000\r\n\r\n";
        assert_eq!(dst.len(), head.len() + 1000);
        assert!(dst.starts_with(head));
    }

    #[test]
    fn unknown_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(&encode(Response::empty(status))[..], &b"HTTP/1.1 599 \r\n\r\n"[..]);
    }
}
