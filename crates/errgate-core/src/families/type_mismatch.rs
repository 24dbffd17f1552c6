use serde_json::Value;

use crate::{Failure, render_value};

/// A request value could not be converted to the type a handler expects
///
/// Raised for path, query and form parameters. When `argument` is set the
/// value was bound to a named handler argument and `property` is the
/// parameter name within it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "Failed to convert value '{}' to required type '{}'",
    render_value(.value),
    .required_type.as_deref().unwrap_or("unknown")
)]
pub struct TypeMismatchError {
    /// Name of the property that failed conversion
    pub property: Option<String>,
    /// The rejected raw value
    pub value: Value,
    /// Type the value should have been converted to
    pub required_type: Option<String>,
    /// Handler argument the value was bound to
    pub argument: Option<String>,
}

impl TypeMismatchError {
    pub fn new(value: impl Into<Value>, required_type: Option<String>) -> Self {
        Self {
            property: None,
            value: value.into(),
            required_type,
            argument: None,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Mark the value as bound to the named handler argument
    #[must_use]
    pub fn for_argument(mut self, argument: impl Into<String>) -> Self {
        self.argument = Some(argument.into());
        self
    }
}

impl Failure for TypeMismatchError {
    fn type_key(&self) -> &str {
        super::TYPE_MISMATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_value_and_type() {
        let err = TypeMismatchError::new("abc", Some("u64".to_owned())).with_property("id");
        assert_eq!(err.to_string(), "Failed to convert value 'abc' to required type 'u64'");
        assert_eq!(err.simple_name(), "TypeMismatch");
    }

    #[test]
    fn unknown_type_is_named() {
        let err = TypeMismatchError::new(12, None);
        assert_eq!(err.to_string(), "Failed to convert value '12' to required type 'unknown'");
    }
}
