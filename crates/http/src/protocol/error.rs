use http::StatusCode;
use std::io;
use thiserror::Error;

/// Error of a single connection, from reading the request to writing the response.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// The request could not be turned into a [`Request`](crate::protocol::Request).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("peer closed the connection without sending a request")]
    Empty,

    #[error("invalid start line: {reason}")]
    InvalidStartLine { reason: String },

    #[error("empty request path")]
    EmptyPath,

    #[error("request path {path:?} does not start with '/'")]
    PathNotAbsolute { path: String },

    #[error("timed out reading the request")]
    Timeout,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_start_line<S: ToString>(str: S) -> Self {
        Self::InvalidStartLine { reason: str.to_string() }
    }

    pub fn path_not_absolute<S: ToString>(path: S) -> Self {
        Self::PathNotAbsolute { path: path.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Whether the peer sent anything we could answer with a `400`.
    ///
    /// A connection that never delivered a byte (or broke while reading) is closed silently.
    pub fn is_answerable(&self) -> bool {
        matches!(self, ParseError::InvalidStartLine { .. } | ParseError::EmptyPath | ParseError::PathNotAbsolute { .. })
    }
}

/// A handler could not produce the regular response for a matched route.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("missing route parameter: {name}")]
    MissingParameter { name: &'static str },

    #[error("handler failed: {reason}")]
    Internal { reason: String },
}

impl HandlerError {
    pub fn missing_parameter(name: &'static str) -> Self {
        Self::MissingParameter { name }
    }

    pub fn internal<S: ToString>(str: S) -> Self {
        Self::Internal { reason: str.to_string() }
    }

    /// The status sent back to the client in place of the handler's response.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            HandlerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("timed out writing the response")]
    Timeout,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_error_status() {
        assert_eq!(HandlerError::missing_parameter("text").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(HandlerError::internal("boom").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn answerable_parse_errors() {
        assert!(ParseError::invalid_start_line("no spaces").is_answerable());
        assert!(ParseError::EmptyPath.is_answerable());
        assert!(!ParseError::Empty.is_answerable());
        assert!(!ParseError::Timeout.is_answerable());
        assert!(!ParseError::io(io::Error::from(io::ErrorKind::ConnectionReset)).is_answerable());
    }
}
