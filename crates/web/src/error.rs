use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors of the listening side of the server.
///
/// `Bind` is fatal: the server can't start. `Accept` only concerns one incoming
/// connection and the accept loop keeps going.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind {address} error: {source}")]
    Bind { address: SocketAddr, source: io::Error },

    #[error("no address to bind")]
    NoAddress,

    #[error("accept error: {source}")]
    Accept { source: io::Error },

    #[error("listener is closed")]
    Closed,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,

    #[error("address must be set")]
    MissingAddress,

    #[error("invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("read buffer size must be greater than zero")]
    ZeroReadBuffer,
}
