//! Server side of the echo HTTP server
//!
//! - [`Router`]: resolves a [`Route`](echo_http::protocol::Route) to a handler
//! - [`handlers`]: the built-in `/` and `/echo/<text>` handlers and the `404` fallback
//! - [`Listener`]: the bound socket
//! - [`Server`]: accept loop with one task per connection and graceful drain
//!
//! # Example
//!
//! ```no_run
//! use echo_web::{echo_router, Server, DEFAULT_PORT};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::builder()
//!         .router(echo_router())
//!         .address(("0.0.0.0", DEFAULT_PORT))
//!         .shutdown(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .build()
//!         .unwrap();
//!
//!     server.start().await.unwrap();
//! }
//! ```

mod error;
mod listener;
mod server;

pub mod handlers;
pub mod router;

pub use error::ServerBuildError;
pub use error::ServerError;
pub use listener::Listener;
pub use router::echo_router;
pub use router::RouteHandler;
pub use router::Router;
pub use server::Server;
pub use server::DEFAULT_DRAIN_TIMEOUT;
pub use server::ServerBuilder;

/// Port the server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 4221;
