//! Request handler abstraction
//!
//! A [`Handler`] turns one [`Request`] into one [`Response`]. Handlers may fail with a
//! [`HandlerError`]; the connection answers such failures with the error's status
//! code instead of the regular response.

use crate::protocol::{HandlerError, Request, Response};

#[trait_variant::make(Handler: Send)]
pub trait LocalHandler {
    async fn call(&self, request: Request) -> Result<Response, HandlerError>;
}

/// A [`Handler`] backed by an async function or closure.
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, HandlerError>> + Send,
{
    fn call(&self, request: Request) -> impl Future<Output = Result<Response, HandlerError>> + Send {
        (self.f)(request)
    }
}

pub fn make_handler<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Result<Response, HandlerError>>,
{
    HandlerFn { f }
}

#[cfg(test)]
mod tests {
    use super::{make_handler, Handler};
    use crate::protocol::{HandlerError, Request, Response};
    use http::StatusCode;

    #[tokio::test]
    async fn closure_handler() {
        let handler = make_handler(|request: Request| async move { Ok(Response::text(StatusCode::OK, request.path().to_owned())) });

        let request = Request::new("GET", "/hello", "HTTP/1.1").unwrap();
        let response = handler.call(request).await.unwrap();

        assert_eq!(response.body().as_ref(), b"/hello");
    }

    #[tokio::test]
    async fn failing_handler() {
        let handler = make_handler(|_request: Request| async { Err(HandlerError::missing_parameter("text")) });

        let request = Request::new("GET", "/echo", "HTTP/1.1").unwrap();
        let error = handler.call(request).await.unwrap_err();

        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }
}
