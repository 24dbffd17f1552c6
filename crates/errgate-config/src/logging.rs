use serde::Deserialize;

/// How the error handler logs each failure it maps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExceptionLogging {
    /// Do not log mapped failures
    NoLogging,
    /// Log the failure message
    #[default]
    MessageOnly,
    /// Log the failure message and its chain of sources
    WithSources,
}
