//! Protocol types shared by the codec, the connection and the handlers.
//!
//! - [`Request`]: the decoded start line (method, path, version)
//! - [`Route`]: the request path split into dispatch segments
//! - [`Response`]: status, ordered header fields and body
//! - Error types:
//!   - [`HttpError`]: top-level error of one connection
//!   - [`ParseError`]: the request could not be decoded
//!   - [`HandlerError`]: a handler could not produce its response
//!   - [`SendError`]: the response could not be written

mod request;
pub use request::Request;

mod route;
pub use route::Route;

mod response;
pub use response::Headers;
pub use response::Response;
pub use response::ResponseBuilder;
pub use response::CONTENT_LENGTH;
pub use response::CONTENT_TYPE;

mod error;
pub use error::HandlerError;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
