//! Router assembly and server lifecycle.
//!
//! Requests flow through request-id injection, tracing, and timeout
//! enforcement before reaching the webhook handler. The webhook route
//! is bound with `any()` so that non-POST methods reach the decode
//! state machine, which owes the caller a 405 with an `Allow` header
//! rather than axum's default routing rejection.

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

use crate::handler::{self, AppState};

/// Creates the webhook router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(handler::health_check))
        .route("/webhook", any(handler::receive_webhook))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

/// Middleware to tag each response with an `X-Request-Id` header.
async fn inject_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let mut response = next.run(req).await;
    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

/// Binds the listener and serves until shutdown.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound or the server
/// fails while running.
pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
    request_timeout: Duration,
) -> std::io::Result<()> {
    let app = create_router(state, request_timeout);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "webhook receiver listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        () = terminate => info!("received SIGTERM"),
    }
}
