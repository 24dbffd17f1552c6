use std::any::Any;

use http::StatusCode;

use crate::property::ExposedProperty;

/// A runtime failure that can be classified into an API error payload
///
/// Implemented by every error type handed to the error handler. All methods
/// have defaults, so a plain `impl Failure for MyError {}` is enough for the
/// fallback mapper to produce a response keyed by the Rust type path.
pub trait Failure: std::error::Error + Any + Send + Sync {
    /// Fully qualified type identity, used as key in the override tables
    ///
    /// Defaults to [`std::any::type_name`], whose output is not guaranteed
    /// to be stable across compiler versions. Failures referred to by the
    /// `http_statuses`, `codes` or `messages` tables should override this
    /// with a fixed name.
    fn type_key(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Last segment of the type key (e.g. `OrderNotFoundError`)
    fn simple_name(&self) -> &str {
        simple_name(self.type_key())
    }

    /// Literal error code declared by the type itself
    ///
    /// Takes precedence over the configured code overrides.
    fn declared_code(&self) -> Option<String> {
        None
    }

    /// HTTP status declared by the type itself
    ///
    /// Takes precedence over the configured status table.
    fn declared_status(&self) -> Option<StatusCode> {
        None
    }

    /// Values this failure exposes as error properties in the response
    fn exposed_properties(&self) -> Vec<ExposedProperty> {
        Vec::new()
    }
}

impl dyn Failure {
    /// Whether the failure is of concrete type `T`
    pub fn is<T: Failure>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    /// Downcast to the concrete failure type
    pub fn downcast_ref<T: Failure>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }
}

/// Last segment of a `::` or `.` separated type path, without generics
pub fn simple_name(type_key: &str) -> &str {
    let base = type_key.split('<').next().unwrap_or(type_key);
    let after_colons = base.rsplit("::").next().unwrap_or(base);
    after_colons.rsplit('.').next().unwrap_or(after_colons)
}
