//! Handlers of the built-in routes.

use echo_http::protocol::{HandlerError, Request, Response, Route};
use http::StatusCode;
use tracing::debug;

/// `GET /`: `200 OK` with no body.
pub fn root(_request: &Request, _route: &Route) -> Result<Response, HandlerError> {
    Ok(Response::empty(StatusCode::OK))
}

/// `GET /echo/<text>`: `<text>` back as `text/plain`.
///
/// `<text>` is everything after `/echo/`, embedded slashes included. `/echo` alone
/// has no parameter and fails with [`HandlerError::MissingParameter`].
pub fn echo(_request: &Request, route: &Route) -> Result<Response, HandlerError> {
    let text = route.parameter().ok_or_else(|| HandlerError::missing_parameter("text"))?;
    debug!(size = text.len(), "echo");
    Ok(Response::text(StatusCode::OK, text.to_owned()))
}

pub fn not_found(request: &Request, _route: &Route) -> Result<Response, HandlerError> {
    debug!(path = request.path(), "no route matched");
    Ok(Response::empty(StatusCode::NOT_FOUND))
}
