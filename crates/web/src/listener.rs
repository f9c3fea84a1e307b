//! TCP listener with address reuse.
//!
//! # Responsibilities
//! - Bind to the first usable configured address
//! - Set `SO_REUSEADDR` so a restart right after a crash can rebind the port
//! - Accept incoming TCP connections
//! - Close idempotently

use std::io;
use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{info, warn};

use crate::error::ServerError;

/// Pending connection queue length passed to `listen`.
const BACKLOG: u32 = 1024;

#[derive(Debug)]
pub struct Listener {
    inner: Option<TcpListener>,
    local_addr: SocketAddr,
}

impl Listener {
    /// Binds and starts listening on `address`.
    ///
    /// Must be called within a tokio runtime.
    pub fn bind(address: SocketAddr) -> Result<Self, ServerError> {
        let bind_error = move |source: io::Error| ServerError::Bind { address, source };

        let socket = (if address.is_ipv4() { TcpSocket::new_v4() } else { TcpSocket::new_v6() }).map_err(bind_error)?;
        socket.set_reuseaddr(true).map_err(bind_error)?;
        socket.bind(address).map_err(bind_error)?;
        let listener = socket.listen(BACKLOG).map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        info!(address = %local_addr, "listener bound");
        Ok(Self { inner: Some(listener), local_addr })
    }

    /// Tries each address in order and keeps the first one that binds.
    pub fn bind_first(addresses: &[SocketAddr]) -> Result<Self, ServerError> {
        let mut last_error = ServerError::NoAddress;
        for &address in addresses {
            match Self::bind(address) {
                Ok(listener) => return Ok(listener),
                Err(e) => {
                    warn!(cause = %e, "bind failed");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    /// Waits for the next client.
    ///
    /// Fails with [`ServerError::Closed`] once the listener has been closed.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ServerError> {
        let listener = self.inner.as_ref().ok_or(ServerError::Closed)?;
        listener.accept().await.map_err(|source| ServerError::Accept { source })
    }

    /// Stops listening. Returns `false` if the listener was already closed.
    pub fn close(&mut self) -> bool {
        match self.inner.take() {
            Some(_listener) => {
                info!(address = %self.local_addr, "listener closed");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    fn loopback() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[tokio::test]
    async fn bind_ephemeral_port() {
        let listener = Listener::bind(loopback()).unwrap();
        assert_ne!(listener.local_addr().port(), 0);
        assert!(!listener.is_closed());
    }

    #[tokio::test]
    async fn accept_client() {
        let listener = Listener::bind(loopback()).unwrap();
        let client = TcpStream::connect(listener.local_addr()).await.unwrap();

        let (_stream, remote_addr) = listener.accept().await.unwrap();
        assert_eq!(remote_addr, client.local_addr().unwrap());
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let mut listener = Listener::bind(loopback()).unwrap();

        assert!(listener.close());
        assert!(!listener.close());
        assert!(listener.is_closed());
        assert!(matches!(listener.accept().await, Err(ServerError::Closed)));
    }

    #[tokio::test]
    async fn port_in_use() {
        let first = Listener::bind(loopback()).unwrap();
        let result = Listener::bind(first.local_addr());

        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }

    #[tokio::test]
    async fn rebind_after_close() {
        let mut listener = Listener::bind(loopback()).unwrap();
        let address = listener.local_addr();

        // leave a server-side socket in TIME_WAIT on the port
        let mut client = TcpStream::connect(address).await.unwrap();
        let (mut stream, _) = listener.accept().await.unwrap();
        stream.shutdown().await.unwrap();
        drop(stream);
        client.shutdown().await.unwrap();
        drop(client);
        listener.close();

        let listener = Listener::bind(address).unwrap();
        assert_eq!(listener.local_addr(), address);
    }

    #[test]
    fn bind_first_without_addresses() {
        assert!(matches!(Listener::bind_first(&[]), Err(ServerError::NoAddress)));
    }

    #[tokio::test]
    async fn bind_first_skips_unusable_address() {
        let taken = Listener::bind(loopback()).unwrap();
        let listener = Listener::bind_first(&[taken.local_addr(), loopback()]).unwrap();

        assert_ne!(listener.local_addr(), taken.local_addr());
    }
}
