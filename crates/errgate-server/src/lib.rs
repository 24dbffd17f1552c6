//! axum integration for errgate
//!
//! Handlers return [`FailureResponse`] (directly or via the [`JsonBody`] and
//! [`PathParam`] extractors); [`error_handling_middleware`] maps the failure
//! through the shared [`ErrorHandler`] and renders the JSON payload in the
//! language of the request.

#![allow(clippy::must_use_candidate)]

mod extract;
mod locale;
mod middleware;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use errgate_config::ServerConfig;
use errgate_handler::ErrorHandler;
use tower_http::trace::TraceLayer;

pub use extract::{JsonBody, PathParam};
pub use locale::request_locale;
pub use middleware::error_handling_middleware;
pub use response::{ApiErrorBody, FailureResponse, PendingFailure};

/// Wrap `routes` so that failures they return are mapped by `handler`
pub fn with_error_handling(routes: Router, handler: Arc<ErrorHandler>) -> Router {
    routes.layer(axum::middleware::from_fn_with_state(handler, error_handling_middleware))
}

/// Routes with error handling and request tracing applied
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    pub fn new(routes: Router, handler: Arc<ErrorHandler>, config: &ServerConfig) -> Self {
        let listen_address = config
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let router = with_error_handling(routes, handler).layer(TraceLayer::new_for_http());

        Self { router, listen_address }
    }

    /// Override the configured listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
