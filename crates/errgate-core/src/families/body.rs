use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use serde_json::error::Category;

use crate::Failure;

/// The request body could not be read into the expected type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct MessageNotReadableError {
    pub message: String,
    /// Recognized deserialization cause, if any
    pub cause: Option<BodyParseCause>,
}

/// Recognized reasons a body failed to deserialize
///
/// `target_type` is the type path of the object being deserialized; the
/// variant name doubles as the message key for the cause.
#[derive(Debug, Clone, PartialEq, thiserror::Error, strum::IntoStaticStr)]
pub enum BodyParseCause {
    /// The body contains a field the target does not know
    #[error("Unrecognized field '{property}' for {target_type}")]
    UnrecognizedProperty { property: String, target_type: String },

    /// The body contains a field the target explicitly ignores
    #[error("Ignored field '{property}' for {target_type}")]
    IgnoredProperty { property: String, target_type: String },

    /// A value has the wrong shape for its field
    #[error("{detail}")]
    InvalidFormat {
        /// Field names from the root to the offending value
        path: Vec<String>,
        target_type: String,
        value: Value,
        detail: String,
    },

    /// A field could not be bound (e.g. it is required but missing)
    #[error("Unable to bind field '{property}' for {target_type}")]
    PropertyBinding { property: String, target_type: String },

    /// The body is not well-formed JSON
    #[error("{detail}")]
    JsonProcessing { detail: String },
}

impl BodyParseCause {
    /// Message key of this cause kind
    pub fn key(&self) -> &'static str {
        self.into()
    }

    pub fn target_type(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedProperty { target_type, .. }
            | Self::IgnoredProperty { target_type, .. }
            | Self::InvalidFormat { target_type, .. }
            | Self::PropertyBinding { target_type, .. } => Some(target_type),
            Self::JsonProcessing { .. } => None,
        }
    }
}

impl MessageNotReadableError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: BodyParseCause) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Classify a `serde_json` failure for a body of type `target_type`
    pub fn from_json_error(err: &serde_json::Error, target_type: &str) -> Self {
        Self::from_json_error_at(err, Vec::new(), target_type)
    }

    /// Like [`Self::from_json_error`], with the field path at which
    /// deserialization failed
    pub fn from_json_error_at(err: &serde_json::Error, path: Vec<String>, target_type: &str) -> Self {
        let detail = err.to_string();
        let cause = match err.classify() {
            Category::Data => classify_data_error(&detail, path, target_type),
            Category::Syntax | Category::Eof | Category::Io => BodyParseCause::JsonProcessing { detail: detail.clone() },
        };

        Self::new(format!("JSON parse error: {detail}")).with_cause(cause)
    }
}

fn classify_data_error(detail: &str, path: Vec<String>, target_type: &str) -> BodyParseCause {
    fn unknown_field() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^unknown field `([^`]*)`").expect("valid unknown field regex"))
    }

    fn missing_field() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^missing field `([^`]*)`").expect("valid missing field regex"))
    }

    fn invalid_value() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        // Group 1: unexpected kind, group 2: quoted or backticked literal
        RE.get_or_init(|| {
            Regex::new(r#"^invalid (?:type|value): (\w+(?: \w+)*?)(?: (?:"((?:[^"\\]|\\.)*)"|`([^`]*)`))?, expected"#)
                .expect("valid invalid value regex")
        })
    }

    fn unknown_variant() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"^unknown variant `([^`]*)`").expect("valid unknown variant regex"))
    }

    let target_type = target_type.to_owned();

    if let Some(caps) = unknown_field().captures(detail) {
        return BodyParseCause::UnrecognizedProperty {
            property: caps[1].to_owned(),
            target_type,
        };
    }

    if let Some(caps) = missing_field().captures(detail) {
        return BodyParseCause::PropertyBinding {
            property: caps[1].to_owned(),
            target_type,
        };
    }

    if let Some(caps) = unknown_variant().captures(detail) {
        return BodyParseCause::InvalidFormat {
            path,
            target_type,
            value: Value::String(caps[1].to_owned()),
            detail: detail.to_owned(),
        };
    }

    if let Some(caps) = invalid_value().captures(detail) {
        let value = match (caps.get(2), caps.get(3)) {
            (Some(quoted), _) => Value::String(quoted.as_str().to_owned()),
            (None, Some(literal)) => {
                serde_json::from_str(literal.as_str()).unwrap_or_else(|_| Value::String(literal.as_str().to_owned()))
            }
            (None, None) => Value::String(caps[1].to_owned()),
        };

        return BodyParseCause::InvalidFormat {
            path,
            target_type,
            value,
            detail: detail.to_owned(),
        };
    }

    BodyParseCause::JsonProcessing {
        detail: detail.to_owned(),
    }
}

impl Failure for MessageNotReadableError {
    fn type_key(&self) -> &str {
        super::MESSAGE_NOT_READABLE
    }
}
