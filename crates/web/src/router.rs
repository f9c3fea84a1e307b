//! Path based routing
//!
//! A [`Router`] picks the [`RouteHandler`] for a request from its [`Route`]:
//!
//! 1. a handler registered for the exact path (query string removed)
//! 2. a handler registered for the first path segment
//! 3. the fallback handler
//!
//! Resolution is a pure function of the route; the router holds no mutable state
//! and is shared by all connections.

use std::collections::HashMap;

use echo_http::handler::Handler;
use echo_http::protocol::{HandlerError, Request, Response, Route};

use crate::handlers;

/// A synchronous handler for one matched route.
pub type RouteHandler = fn(&Request, &Route) -> Result<Response, HandlerError>;

#[derive(Debug)]
pub struct Router {
    exact: HashMap<String, RouteHandler>,
    segments: HashMap<String, RouteHandler>,
    fallback: RouteHandler,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Resolves the handler for `route`.
    pub fn at(&self, route: &Route) -> RouteHandler {
        if let Some(handler) = self.exact.get(route.path()) {
            return *handler;
        }

        route.first_segment().and_then(|segment| self.segments.get(segment)).copied().unwrap_or(self.fallback)
    }
}

impl Handler for Router {
    async fn call(&self, request: Request) -> Result<Response, HandlerError> {
        let route = request.route();
        let handler = self.at(&route);
        handler(&request, &route)
    }
}

#[derive(Debug)]
pub struct RouterBuilder {
    exact: HashMap<String, RouteHandler>,
    segments: HashMap<String, RouteHandler>,
    fallback: RouteHandler,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { exact: HashMap::new(), segments: HashMap::new(), fallback: handlers::not_found }
    }

    /// Registers `handler` for exactly `path`, e.g. `"/"`.
    pub fn route(mut self, path: impl Into<String>, handler: RouteHandler) -> Self {
        self.exact.insert(path.into(), handler);
        self
    }

    /// Registers `handler` for every path whose first segment is `segment`.
    pub fn segment(mut self, segment: impl Into<String>, handler: RouteHandler) -> Self {
        self.segments.insert(segment.into(), handler);
        self
    }

    /// Replaces the default `404 Not Found` fallback.
    pub fn fallback(mut self, handler: RouteHandler) -> Self {
        self.fallback = handler;
        self
    }

    pub fn build(self) -> Router {
        Router { exact: self.exact, segments: self.segments, fallback: self.fallback }
    }
}

/// The server's routes: `/`, `/echo/<text>` and `404` for everything else.
pub fn echo_router() -> Router {
    Router::builder().route("/", handlers::root).segment("echo", handlers::echo).fallback(handlers::not_found).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    async fn status_of(router: &Router, path: &str) -> Result<StatusCode, HandlerError> {
        let request = Request::new("GET", path, "HTTP/1.1").unwrap();
        router.call(request).await.map(|response| response.status())
    }

    #[tokio::test]
    async fn echo_routes() {
        let router = echo_router();

        assert_eq!(status_of(&router, "/").await.unwrap(), StatusCode::OK);
        assert_eq!(status_of(&router, "/?q=1").await.unwrap(), StatusCode::OK);
        assert_eq!(status_of(&router, "/echo/abc").await.unwrap(), StatusCode::OK);
        assert_eq!(status_of(&router, "/echo/").await.unwrap(), StatusCode::OK);
        assert_eq!(status_of(&router, "/foo").await.unwrap(), StatusCode::NOT_FOUND);
        assert_eq!(status_of(&router, "/echoes/abc").await.unwrap(), StatusCode::NOT_FOUND);
        assert_eq!(status_of(&router, "/ECHO/abc").await.unwrap(), StatusCode::NOT_FOUND);
        assert_eq!(status_of(&router, "//").await.unwrap(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_echo_parameter() {
        let router = echo_router();
        let error = status_of(&router, "/echo").await.unwrap_err();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn echo_body() {
        let router = echo_router();
        let request = Request::new("GET", "/echo/a/b", "HTTP/1.1").unwrap();
        let response = router.call(request).await.unwrap();
        assert_eq!(response.body().as_ref(), b"a/b");
    }

    #[tokio::test]
    async fn exact_route_wins_over_segment() {
        fn teapot(_request: &Request, _route: &Route) -> Result<Response, HandlerError> {
            Ok(Response::empty(StatusCode::IM_A_TEAPOT))
        }

        let router = Router::builder().route("/echo/tea", teapot).segment("echo", handlers::echo).build();

        assert_eq!(status_of(&router, "/echo/tea").await.unwrap(), StatusCode::IM_A_TEAPOT);
        assert_eq!(status_of(&router, "/echo/coffee").await.unwrap(), StatusCode::OK);
    }

    #[tokio::test]
    async fn custom_fallback() {
        fn gone(_request: &Request, _route: &Route) -> Result<Response, HandlerError> {
            Ok(Response::empty(StatusCode::GONE))
        }

        let router = Router::builder().fallback(gone).build();
        assert_eq!(status_of(&router, "/").await.unwrap(), StatusCode::GONE);
    }

    #[tokio::test]
    async fn default_fallback_is_not_found() {
        let router = Router::builder().build();
        assert_eq!(status_of(&router, "/anything").await.unwrap(), StatusCode::NOT_FOUND);
    }
}
