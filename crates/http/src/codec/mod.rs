//! Codec for the start line based protocol
//!
//! - [`RequestDecoder`]: decodes the request start line into a
//!   [`Request`](crate::protocol::Request)
//! - [`ResponseEncoder`]: serializes a [`Response`](crate::protocol::Response)
//!   with its exact byte count
//!
//! Both implement the `tokio_util` codec traits, so they can be driven by a
//! `FramedRead`/`FramedWrite` as well as called directly on a buffer as the
//! connection does.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use echo_http::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut buffer = BytesMut::from("GET /echo/abc HTTP/1.1\r\n\r\n");
//! let request = RequestDecoder::new().decode(&mut buffer).unwrap().unwrap();
//! assert_eq!(request.route().parameter(), Some("abc"));
//! ```

mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
