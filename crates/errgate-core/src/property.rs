use std::borrow::Cow;
use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

/// Where an exposed property comes from on the failure
///
/// Accessor-derived properties are computed, field-derived ones are stored
/// data. When both expose the same name the field-derived value is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertySource {
    /// Computed from the failure (a getter-like method)
    Accessor,
    /// Stored on the failure
    Field,
}

/// Reasons an exposed property could not be evaluated
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    /// The value could not be converted to JSON
    #[error("value could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Computing the value failed
    #[error("evaluation failed: {0}")]
    Evaluation(String),
}

/// A named value a failure exposes in the error response
///
/// A JSON `null` value counts as absent and is dropped unless the property
/// was marked with [`ExposedProperty::include_if_absent`].
#[derive(Debug)]
pub struct ExposedProperty {
    name: Cow<'static, str>,
    source: PropertySource,
    include_if_absent: bool,
    value: Result<Value, PropertyError>,
}

impl ExposedProperty {
    /// Expose a stored value
    pub fn field<T>(name: impl Into<Cow<'static, str>>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        Self::new(name, PropertySource::Field, serialize(value))
    }

    /// Expose a computed value
    pub fn accessor<T>(name: impl Into<Cow<'static, str>>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        Self::new(name, PropertySource::Accessor, serialize(value))
    }

    /// Expose a computed value whose evaluation may fail
    pub fn try_accessor<T, E>(name: impl Into<Cow<'static, str>>, evaluate: impl FnOnce() -> Result<T, E>) -> Self
    where
        T: Serialize,
        E: Display,
    {
        let value = evaluate()
            .map_err(|e| PropertyError::Evaluation(e.to_string()))
            .and_then(|v| serialize(&v));

        Self::new(name, PropertySource::Accessor, value)
    }

    fn new(name: impl Into<Cow<'static, str>>, source: PropertySource, value: Result<Value, PropertyError>) -> Self {
        Self {
            name: name.into(),
            source,
            include_if_absent: false,
            value,
        }
    }

    /// Keep this property in the response even when its value is absent
    #[must_use]
    pub fn include_if_absent(mut self) -> Self {
        self.include_if_absent = true;
        self
    }

    /// Property name as it appears in the response
    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn source(&self) -> PropertySource {
        self.source
    }

    pub const fn includes_absent(&self) -> bool {
        self.include_if_absent
    }

    /// Evaluated value, or the reason evaluation failed
    pub const fn value(&self) -> Result<&Value, &PropertyError> {
        self.value.as_ref()
    }

    /// Split into name and evaluated value
    pub fn into_parts(self) -> (String, Result<Value, PropertyError>) {
        (self.name.into_owned(), self.value)
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value, PropertyError> {
    Ok(serde_json::to_value(value)?)
}
