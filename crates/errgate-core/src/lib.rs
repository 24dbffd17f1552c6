//! Core types for errgate
//!
//! Defines the [`Failure`] capability that every classifiable error
//! implements, the API error payload returned to clients, and the built-in
//! failure families recognized by the mapper chain.

#![allow(clippy::must_use_candidate)]

mod failure;
pub mod families;
mod locale;
mod property;
mod response;

pub use failure::{Failure, simple_name};
pub use locale::Locale;
pub use property::{ExposedProperty, PropertyError, PropertySource};
pub use response::{ApiErrorResponse, ApiFieldError, ApiGlobalError};

/// Render a JSON value the way it appears inside human-readable text
///
/// Strings are written without quotes, everything else as compact JSON.
pub fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
