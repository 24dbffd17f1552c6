use std::path::PathBuf;

use serde::Deserialize;

/// File-backed message catalog configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory holding the message bundles
    pub directory: PathBuf,
    /// Bundle file stem: `<basename>.toml`, `<basename>_<locale>.toml`
    #[serde(default = "default_basename")]
    pub basename: String,
    /// Locale tried before the root bundle when the requested one misses
    #[serde(default)]
    pub default_locale: Option<String>,
}

fn default_basename() -> String {
    "messages".to_string()
}
