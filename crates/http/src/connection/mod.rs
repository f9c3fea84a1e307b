//! Connection handling
//!
//! [`HttpConnection`] is the per-connection worker. It moves through
//! [`ConnectionState`]s in order:
//!
//! ```text
//! Reading -> Parsing -> Routing -> Writing -> Closed
//! ```
//!
//! and may jump to `Closed` from any of them on error, after trying to deliver an
//! error response. A connection handles a single request; there is no keep-alive.
//!
//! [`MessageWriter`] buffers the encoded response and writes it with a loop over
//! partial writes, so exactly the encoded byte count reaches the peer.

mod http_connection;
mod message_writer;

pub use http_connection::ConnectionState;
pub use http_connection::HttpConnection;
pub use http_connection::DEFAULT_READ_BUFFER_SIZE;
pub use message_writer::MessageWriter;
