use std::process::ExitCode;
use std::time::Duration;

use echo_web::{echo_router, Server, DEFAULT_PORT};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

const READ_TIMEOUT: Duration = Duration::from_secs(10);
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let server = Server::builder()
        .router(echo_router())
        .address(("0.0.0.0", DEFAULT_PORT))
        .read_timeout(READ_TIMEOUT)
        .write_timeout(WRITE_TIMEOUT)
        .shutdown(shutdown_signal())
        .build();
    let server = match server {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "invalid server configuration");
            return ExitCode::FAILURE;
        }
    };

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "server error");
            ExitCode::FAILURE
        }
    }
}

/// Completes on Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(cause = %e, "can't listen for ctrl-c, graceful shutdown disabled");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
