use std::path::PathBuf;

use clap::Parser;

/// errgate demo server
#[derive(Debug, Parser)]
#[command(name = "errgate", about = "Demo API whose failures are mapped into localized error payloads")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "errgate.toml", env = "ERRGATE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ERRGATE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directives
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_filter: String,
}
