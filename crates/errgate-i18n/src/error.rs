use std::path::PathBuf;

/// Errors raised while loading a message catalog from disk
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse message bundle {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("message `{key}` in {} must be a string", .path.display())]
    InvalidValue { path: PathBuf, key: String },

    #[error("no `{basename}` message bundles found in {}", .directory.display())]
    NoBundles { directory: PathBuf, basename: String },
}
