//! HTTP response type.
//!
//! A [`Response`] is built once by a handler and consumed once by the
//! [`ResponseEncoder`](crate::codec::ResponseEncoder). Header fields keep their
//! insertion order and the spelling they were inserted with, since they are
//! written to the wire verbatim.

use bytes::Bytes;
use http::StatusCode;

pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_TYPE: &str = "Content-Type";

/// Ordered list of response header fields.
///
/// Names are compared ASCII case-insensitively; inserting a name that is already
/// present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| existing.eq_ignore_ascii_case(&name)) {
            Some((_, existing_value)) => *existing_value = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(existing, _)| existing.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A complete HTTP response: status, header fields and body.
///
/// If a `Content-Length` field is present its value always equals the body length;
/// [`ResponseBuilder::body`] rewrites it when the body is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::default()
    }

    /// A response with no header fields and no body.
    pub fn empty(status: StatusCode) -> Self {
        Self { status, headers: Headers::new(), body: Bytes::new() }
    }

    /// A `text/plain` response carrying `Content-Type` and `Content-Length`.
    pub fn text(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self::builder().status(status).header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref()).content_length().body(body)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_parts(self) -> (StatusCode, Headers, Bytes) {
        (self.status, self.headers, self.body)
    }
}

#[derive(Debug, Default)]
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Headers,
    content_length: bool,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
            // the value is always derived from the body
            self.content_length = true;
            self.headers.insert(name, String::new());
        } else {
            self.headers.insert(name, value);
        }
        self
    }

    /// Adds a `Content-Length` field computed from the body.
    pub fn content_length(self) -> Self {
        self.header(CONTENT_LENGTH, "")
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Response {
        let body = body.into();
        if self.content_length {
            self.headers.insert(CONTENT_LENGTH, body.len().to_string());
        }
        Response { status: self.status, headers: self.headers, body }
    }
}
