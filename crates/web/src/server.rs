use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use echo_http::connection::{HttpConnection, DEFAULT_READ_BUFFER_SIZE};
use echo_http::protocol::{HttpError, ParseError};
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::error::{ServerBuildError, ServerError};
use crate::listener::Listener;
use crate::router::Router;

/// How long in-flight connections may run after shutdown before they are aborted.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause after a failed accept, so a persistent error such as EMFILE does not spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Per-connection settings copied into every worker.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    read_buffer_size: usize,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self { read_buffer_size: DEFAULT_READ_BUFFER_SIZE, read_timeout: None, write_timeout: None }
    }
}

pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<Vec<SocketAddr>>,
    address_error: Option<String>,
    options: ConnectionOptions,
    drain_timeout: Duration,
    shutdown: Option<BoxFuture<'static, ()>>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self {
            router: None,
            address: None,
            address_error: None,
            options: ConnectionOptions::default(),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
            shutdown: None,
        }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        match address.to_socket_addrs() {
            Ok(addresses) => self.address = Some(addresses.collect()),
            Err(e) => self.address_error = Some(e.to_string()),
        }
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Upper bound of the single request read, in bytes.
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.options.read_buffer_size = size;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.options.read_timeout = Some(timeout);
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.options.write_timeout = Some(timeout);
        self
    }

    /// Upper bound of the drain after shutdown; connections still running then are aborted.
    pub fn drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    /// Stops accepting when `signal` completes, then drains in-flight connections.
    pub fn shutdown<F>(mut self, signal: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.shutdown = Some(signal.boxed());
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        if let Some(reason) = self.address_error {
            return Err(ServerBuildError::InvalidAddress { reason });
        }
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.filter(|address| !address.is_empty()).ok_or(ServerBuildError::MissingAddress)?;
        if self.options.read_buffer_size == 0 {
            return Err(ServerBuildError::ZeroReadBuffer);
        }

        Ok(Server {
            router: Arc::new(router),
            address,
            options: self.options,
            drain_timeout: self.drain_timeout,
            shutdown: self.shutdown,
        })
    }
}

impl fmt::Debug for ServerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerBuilder")
            .field("router", &self.router)
            .field("address", &self.address)
            .field("options", &self.options)
            .field("drain_timeout", &self.drain_timeout)
            .field("shutdown", &self.shutdown.is_some())
            .finish_non_exhaustive()
    }
}

/// Accept loop spawning one worker task per connection.
pub struct Server {
    router: Arc<Router>,
    address: Vec<SocketAddr>,
    options: ConnectionOptions,
    drain_timeout: Duration,
    shutdown: Option<BoxFuture<'static, ()>>,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the first usable configured address.
    pub fn bind(&self) -> Result<Listener, ServerError> {
        Listener::bind_first(&self.address)
    }

    /// Binds and serves until the shutdown signal fires.
    ///
    /// Only a bind failure is returned; failures of single connections are logged.
    pub async fn start(self) -> Result<(), ServerError> {
        let listener = match self.bind() {
            Ok(listener) => listener,
            Err(e) => {
                warn!(cause = %e, "bind server error");
                return Err(e);
            }
        };
        self.serve(listener).await;
        Ok(())
    }

    /// Serves connections from `listener`.
    ///
    /// Without a shutdown signal this never returns. Once the signal fires, the
    /// listener is closed and in-flight connections get up to the drain timeout
    /// to finish; whatever is still running after that is aborted.
    pub async fn serve(self, mut listener: Listener) {
        let Server { router, options, drain_timeout, shutdown, .. } = self;
        let mut shutdown = shutdown.unwrap_or_else(|| future::pending().boxed());
        let tracker = TaskTracker::new();
        let abort = CancellationToken::new();

        info!(address = %listener.local_addr(), "start listening");
        loop {
            let (tcp_stream, remote_addr) = tokio::select! {
                () = &mut shutdown => {
                    info!("shutdown requested, stop accepting");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok(stream_and_addr) => stream_and_addr,
                    Err(ServerError::Closed) => {
                        warn!("listener closed, stop accepting");
                        break;
                    }
                    Err(e) => {
                        warn!(cause = %e, "failed to accept");
                        tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                        continue;
                    }
                },
            };

            let worker = serve_connection(tcp_stream, remote_addr, Arc::clone(&router), options);
            let abort = abort.clone();
            tracker.spawn(async move {
                tokio::select! {
                    () = worker => {}
                    () = abort.cancelled() => debug!(remote = %remote_addr, "connection aborted"),
                }
            });
        }

        listener.close();
        tracker.close();
        info!(in_flight = tracker.len(), "draining connections");
        if tokio::time::timeout(drain_timeout, tracker.wait()).await.is_err() {
            warn!(remaining = tracker.len(), timeout = ?drain_timeout, "drain timed out, aborting connections");
            abort.cancel();
            tracker.wait().await;
        }
        info!("server stopped");
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("router", &self.router)
            .field("address", &self.address)
            .field("options", &self.options)
            .field("drain_timeout", &self.drain_timeout)
            .finish_non_exhaustive()
    }
}

async fn serve_connection(tcp_stream: TcpStream, remote_addr: SocketAddr, router: Arc<Router>, options: ConnectionOptions) {
    let (reader, writer) = tcp_stream.into_split();
    let connection = HttpConnection::with_capacity(reader, writer, options.read_buffer_size)
        .read_timeout(options.read_timeout)
        .write_timeout(options.write_timeout);

    match connection.process(router).await {
        Ok(()) => debug!(remote = %remote_addr, "finished process, connection closed"),
        Err(HttpError::RequestError { source: ParseError::Empty }) => {
            debug!(remote = %remote_addr, "peer sent nothing, connection closed")
        }
        Err(e) => warn!(remote = %remote_addr, cause = %e, "connection closed with error"),
    }
}
