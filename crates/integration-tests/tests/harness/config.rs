//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use errgate_config::{CatalogConfig, CodeStrategy, Config, ExceptionLogging, HttpStatus, ServerConfig};
use http::StatusCode;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                },
                exception_logging: ExceptionLogging::NoLogging,
                ..Config::default()
            },
        }
    }

    /// Override the code for a type key, bare code or `path.code`
    pub fn with_code(mut self, key: &str, code: &str) -> Self {
        self.config.codes.insert(key.to_owned(), code.to_owned());
        self
    }

    /// Override the message for a type key, bare code or `path.code`
    pub fn with_message(mut self, key: &str, message: &str) -> Self {
        self.config.messages.insert(key.to_owned(), message.to_owned());
        self
    }

    /// Configure the status for a failure type key
    pub fn with_status(mut self, key: &str, status: StatusCode) -> Self {
        self.config.http_statuses.insert(key.to_owned(), HttpStatus::new(status));
        self
    }

    pub fn with_strategy(mut self, strategy: CodeStrategy) -> Self {
        self.config.default_code_strategy = strategy;
        self
    }

    /// Load message bundles from `directory`
    pub fn with_catalog(mut self, directory: &Path, default_locale: Option<&str>) -> Self {
        self.config.catalog = Some(CatalogConfig {
            directory: directory.to_path_buf(),
            basename: "messages".to_owned(),
            default_locale: default_locale.map(str::to_owned),
        });
        self
    }

    /// Turn failure mapping off
    pub fn disabled(mut self) -> Self {
        self.config.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
