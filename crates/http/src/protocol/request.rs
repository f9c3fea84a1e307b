//! The request start line.
//!
//! Only the first line of the request is kept: method, path and version. Header
//! fields and bodies are not interpreted by this server.

use crate::ensure;
use crate::protocol::{ParseError, Route};

/// A parsed request start line.
///
/// A `Request` always has a non-empty method and a path starting with `/`; both
/// are checked by [`Request::new`], which is the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    version: String,
}

impl Request {
    /// Builds a request from the three start line tokens.
    ///
    /// The version token is kept as-is, it is not validated.
    pub fn new(method: impl Into<String>, path: impl Into<String>, version: impl Into<String>) -> Result<Self, ParseError> {
        let method = method.into();
        let path = path.into();

        ensure!(!method.is_empty(), ParseError::invalid_start_line("empty method"));
        ensure!(!path.is_empty(), ParseError::EmptyPath);
        ensure!(path.starts_with('/'), ParseError::path_not_absolute(&path));

        Ok(Self { method, path, version: version.into() })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The raw request target, including any query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Splits the path into the segments used for dispatch.
    pub fn route(&self) -> Route {
        Route::parse(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let request = Request::new("GET", "/echo/abc", "HTTP/1.1").unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/echo/abc");
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.route().segments(), ["echo", "abc"]);
    }

    #[test]
    fn version_is_not_validated() {
        let request = Request::new("GET", "/", "whatever").unwrap();
        assert_eq!(request.version(), "whatever");

        let request = Request::new("GET", "/", "").unwrap();
        assert_eq!(request.version(), "");
    }

    #[test]
    fn rejects_broken_tokens() {
        assert!(matches!(Request::new("", "/", "HTTP/1.1"), Err(ParseError::InvalidStartLine { .. })));
        assert!(matches!(Request::new("GET", "", "HTTP/1.1"), Err(ParseError::EmptyPath)));
        assert!(matches!(Request::new("GET", "echo/abc", "HTTP/1.1"), Err(ParseError::PathNotAbsolute { .. })));
    }
}
