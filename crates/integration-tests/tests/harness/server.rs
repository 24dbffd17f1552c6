//! Test server wrapper that starts the test routes on a random port

use std::net::SocketAddr;
use std::sync::Arc;

use errgate_config::Config;
use errgate_handler::{ApiErrorMapper, ErrorHandler};
use errgate_server::Server;
use tokio_util::sync::CancellationToken;

use super::routes;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        let handler = ErrorHandler::new(&config)?;
        Self::start_with_handler(&config, handler).await
    }

    /// Start a test server whose handler also runs `mapper`
    pub async fn start_with_mapper(config: Config, mapper: impl ApiErrorMapper + 'static) -> anyhow::Result<Self> {
        let handler = ErrorHandler::builder(&config).mapper(mapper).build()?;
        Self::start_with_handler(&config, handler).await
    }

    async fn start_with_handler(config: &Config, handler: ErrorHandler) -> anyhow::Result<Self> {
        let server = Server::new(routes::router(), Arc::new(handler), &config.server);
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
