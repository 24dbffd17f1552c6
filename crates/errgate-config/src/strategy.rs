use serde::Deserialize;

/// How an error code is derived for a failure without an explicit code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CodeStrategy {
    /// The full type key (e.g. `shop::errors::OrderNotFoundError`)
    #[serde(alias = "FULL_QUALIFIED_NAME")]
    FullQualifiedName,
    /// Simple name in upper snake case without an `Exception` suffix
    #[default]
    #[serde(alias = "ALL_CAPS")]
    AllCaps,
}
