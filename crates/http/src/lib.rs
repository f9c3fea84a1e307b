//! Protocol pieces of a small concurrent HTTP echo server
//!
//! This crate decodes the start line of an HTTP/1.1-shaped request, hands it to a
//! [`handler::Handler`] and writes the handler's response back with its exact byte
//! count. Each connection carries exactly one request and is closed afterwards.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use echo_http::connection::HttpConnection;
//! use echo_http::handler::make_handler;
//! use echo_http::protocol::{HandlerError, Request, Response};
//! use http::StatusCode;
//! use tokio::net::TcpListener;
//! use tracing::{info, warn};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = TcpListener::bind("127.0.0.1:4221").await.unwrap();
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = Arc::clone(&handler);
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             match connection.process(handler).await {
//!                 Ok(()) => info!("finished process, connection closed"),
//!                 Err(e) => warn!(cause = %e, "connection closed with error"),
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response, HandlerError> {
//!     info!(path = request.path(), "request path");
//!     Ok(Response::text(StatusCode::OK, "Hello World!"))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: [`protocol::Request`], [`protocol::Route`], [`protocol::Response`]
//!   and the error taxonomy
//! - [`codec`]: start line decoding and response encoding
//! - [`connection`]: the per-connection worker
//! - [`handler`]: request handler trait and utilities
//!
//! # Error Handling
//!
//! - [`protocol::ParseError`]: the request could not be decoded, answered with `400`
//!   when the peer sent anything
//! - [`protocol::HandlerError`]: a handler failed, answered with the error's status
//! - [`protocol::SendError`]: the response could not be written, the connection is
//!   abandoned
//! - [`protocol::HttpError`]: top-level error returned by a connection
//!
//! # Limitations
//!
//! - One request per connection, no keep-alive or pipelining
//! - Only the start line is interpreted; header fields and bodies are ignored
//! - The request is taken from a single read of at most
//!   [`connection::DEFAULT_READ_BUFFER_SIZE`] bytes by default
//! - No TLS support

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
