use std::collections::BTreeMap;

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Error payload returned to API consumers
///
/// Serializes to `{"code", "message", "fieldErrors", "globalErrors", ...}`
/// with the error properties flattened into the top-level object. Empty
/// error lists are omitted and the HTTP status is not part of the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    #[serde(skip)]
    http_status: StatusCode,
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<ApiFieldError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    global_errors: Vec<ApiGlobalError>,
    #[serde(flatten)]
    error_properties: BTreeMap<String, Value>,
}

impl ApiErrorResponse {
    pub fn new(http_status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            http_status,
            code: code.into(),
            message: message.into(),
            field_errors: Vec::new(),
            global_errors: Vec::new(),
            error_properties: BTreeMap::new(),
        }
    }

    /// Add a named property, replacing any previous value under that name
    pub fn add_error_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.error_properties.insert(name.into(), value.into());
    }

    pub fn add_error_properties(&mut self, properties: impl IntoIterator<Item = (String, Value)>) {
        self.error_properties.extend(properties);
    }

    pub fn add_field_error(&mut self, error: ApiFieldError) {
        self.field_errors.push(error);
    }

    pub fn add_global_error(&mut self, error: ApiGlobalError) {
        self.global_errors.push(error);
    }

    pub const fn http_status(&self) -> StatusCode {
        self.http_status
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Error properties in alphabetical key order
    pub const fn error_properties(&self) -> &BTreeMap<String, Value> {
        &self.error_properties
    }

    pub fn field_errors(&self) -> &[ApiFieldError] {
        &self.field_errors
    }

    pub fn global_errors(&self) -> &[ApiGlobalError] {
        &self.global_errors
    }
}

/// A violation attributable to one input field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFieldError {
    pub code: String,
    /// Dotted path of the offending field
    pub property: String,
    pub message: String,
    pub rejected_value: Value,
}

impl ApiFieldError {
    pub fn new(
        code: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
        rejected_value: impl Into<Value>,
    ) -> Self {
        Self {
            code: code.into(),
            property: property.into(),
            message: message.into(),
            rejected_value: rejected_value.into(),
        }
    }
}

/// A violation that spans several fields or the whole object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiGlobalError {
    pub code: String,
    pub message: String,
}

impl ApiGlobalError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
