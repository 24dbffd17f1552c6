#![allow(clippy::must_use_candidate)]

pub mod catalog;
mod env;
mod loader;
pub mod logging;
pub mod server;
pub mod status;
pub mod strategy;

use indexmap::IndexMap;
use serde::Deserialize;

pub use catalog::*;
pub use logging::*;
pub use server::*;
pub use status::*;
pub use strategy::*;

/// Top-level errgate configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Map failures through the handler; when off they surface as bare 500s
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// HTTP status per failure type key
    #[serde(default)]
    pub http_statuses: IndexMap<String, HttpStatus>,
    /// Error code overrides, keyed by type key, bare code or `path.code`
    #[serde(default)]
    pub codes: IndexMap<String, String>,
    /// Message overrides, same keying as `codes`
    #[serde(default)]
    pub messages: IndexMap<String, String>,
    /// How codes are derived for failures without an override
    #[serde(default)]
    pub default_code_strategy: CodeStrategy,
    /// How mapped failures are logged
    #[serde(default)]
    pub exception_logging: ExceptionLogging,
    /// File-backed message catalog
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
    /// Server configuration for the errgate binary
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            http_statuses: IndexMap::new(),
            codes: IndexMap::new(),
            messages: IndexMap::new(),
            default_code_strategy: CodeStrategy::default(),
            exception_logging: ExceptionLogging::default(),
            catalog: None,
            server: ServerConfig::default(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}
