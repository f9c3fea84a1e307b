//! Serves the echo routes plus a `/health` route on port 8080.
//!
//! ```sh
//! curl -v http://127.0.0.1:8080/health
//! curl -v http://127.0.0.1:8080/echo/hello
//! ```

use echo_http::protocol::{HandlerError, Request, Response, Route};
use echo_web::{handlers, Router, Server};
use http::StatusCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn health(_request: &Request, _route: &Route) -> Result<Response, HandlerError> {
    Ok(Response::text(StatusCode::OK, "ok"))
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let router = Router::builder()
        .route("/", handlers::root)
        .route("/health", health)
        .segment("echo", handlers::echo)
        .build();

    let server = Server::builder()
        .router(router)
        .address("127.0.0.1:8080")
        .shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .build()
        .unwrap();

    server.start().await.unwrap();
}
