//! Mappers turning one kind of failure into an [`ApiErrorResponse`]

mod constraint_violation;
mod fallback;
mod message_not_readable;
mod method_argument;
mod optimistic_locking;
mod security;
mod type_mismatch;

use std::collections::BTreeMap;

use errgate_config::HttpStatus;
use errgate_core::{ApiErrorResponse, Failure, Locale};
use http::StatusCode;
use indexmap::IndexMap;
use serde_json::Value;

pub use constraint_violation::ConstraintViolationMapper;
pub use fallback::FallbackMapper;
pub use message_not_readable::MessageNotReadableMapper;
pub use method_argument::MethodArgumentNotValidMapper;
pub use optimistic_locking::OptimisticLockingMapper;
pub use security::SecurityMapper;
pub use type_mismatch::TypeMismatchMapper;

use crate::{CodeResolver, MessageArg, MessageResolver, PropertyExtractor};

/// Maps failures it recognizes into an error response
///
/// Mappers are consulted in registration order and the first one whose
/// [`can_handle`](Self::can_handle) returns true produces the response.
pub trait ApiErrorMapper: Send + Sync {
    fn can_handle(&self, failure: &dyn Failure) -> bool;

    fn handle(&self, failure: &dyn Failure, cx: &MappingContext<'_>) -> ApiErrorResponse;

    /// Name used when logging which mapper handled a failure
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Everything a mapper needs to build a response for one request
#[derive(Debug)]
pub struct MappingContext<'a> {
    pub(crate) codes: &'a CodeResolver,
    pub(crate) messages: &'a MessageResolver,
    pub(crate) message_overrides: &'a IndexMap<String, String>,
    pub(crate) http_statuses: &'a IndexMap<String, HttpStatus>,
    pub(crate) extractor: PropertyExtractor,
    pub(crate) locale: &'a Locale,
}

impl MappingContext<'_> {
    /// Status declared by the failure, configured for its type, or `default`
    pub fn status(&self, failure: &dyn Failure, default: StatusCode) -> StatusCode {
        failure
            .declared_status()
            .or_else(|| self.configured_status(failure))
            .unwrap_or(default)
    }

    /// Status configured for the failure's type key
    pub fn configured_status(&self, failure: &dyn Failure) -> Option<StatusCode> {
        self.http_statuses
            .get(failure.type_key())
            .map(|status| status.as_status_code())
    }

    pub fn code(&self, failure: &dyn Failure) -> String {
        self.codes.resolve_code(failure)
    }

    pub fn field_code(&self, path: &str, base: &str) -> String {
        self.codes.resolve_field_code(path, base)
    }

    pub fn bare_code(&self, code: &str) -> String {
        self.codes.resolve_bare_code(code)
    }

    /// Top-level message: a configured override for the type key, otherwise
    /// resolved from the catalog
    pub fn failure_message(&self, failure: &dyn Failure, codes: &[String], args: &[MessageArg], default: &str) -> String {
        match self.message_overrides.get(failure.type_key()) {
            Some(message) => message.clone(),
            None => self.resolve(codes, args, default),
        }
    }

    /// Message configured for `path.code`, then for `code`
    pub fn field_message_override(&self, path: &str, code: &str) -> Option<&str> {
        self.message_overrides
            .get(&format!("{path}.{code}"))
            .or_else(|| self.message_overrides.get(code))
            .map(String::as_str)
    }

    /// Message configured for `code`
    pub fn message_override(&self, code: &str) -> Option<&str> {
        self.message_overrides.get(code).map(String::as_str)
    }

    pub fn resolve(&self, codes: &[String], args: &[MessageArg], default: &str) -> String {
        self.messages.resolve(codes, args, default, self.locale)
    }

    pub fn properties(&self, failure: &dyn Failure) -> BTreeMap<String, Value> {
        self.extractor.extract(failure)
    }

    pub const fn locale(&self) -> &Locale {
        self.locale
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use errgate_config::{CodeStrategy, HttpStatus};
    use errgate_core::{ApiErrorResponse, Failure, Locale};
    use errgate_i18n::StaticCatalog;
    use indexmap::IndexMap;

    use super::{ApiErrorMapper, MappingContext};
    use crate::{CodeResolver, MessageResolver, PropertyExtractor, defaults};

    /// Owned pieces a [`MappingContext`] borrows from
    #[derive(Default)]
    pub struct Fixture {
        pub codes: IndexMap<String, String>,
        pub messages: IndexMap<String, String>,
        pub http_statuses: IndexMap<String, HttpStatus>,
        pub catalog: Option<StaticCatalog>,
        pub locale: Locale,
    }

    impl Fixture {
        pub fn code(mut self, key: &str, code: &str) -> Self {
            self.codes.insert(key.to_owned(), code.to_owned());
            self
        }

        pub fn message(mut self, key: &str, message: &str) -> Self {
            self.messages.insert(key.to_owned(), message.to_owned());
            self
        }

        pub fn status(mut self, key: &str, status: http::StatusCode) -> Self {
            self.http_statuses.insert(key.to_owned(), HttpStatus::new(status));
            self
        }

        pub fn catalog(mut self, catalog: StaticCatalog) -> Self {
            self.catalog = Some(catalog);
            self
        }

        pub fn map(&self, mapper: &dyn ApiErrorMapper, failure: &dyn Failure) -> ApiErrorResponse {
            assert!(mapper.can_handle(failure), "{} cannot handle {}", mapper.name(), failure.type_key());

            let codes = CodeResolver::new(defaults::merged_codes(&self.codes), CodeStrategy::AllCaps);
            let messages = MessageResolver::new(
                self.catalog
                    .clone()
                    .map(|catalog| Arc::new(catalog) as Arc<dyn errgate_i18n::MessageCatalog>),
            );
            let cx = MappingContext {
                codes: &codes,
                messages: &messages,
                message_overrides: &self.messages,
                http_statuses: &self.http_statuses,
                extractor: PropertyExtractor,
                locale: &self.locale,
            };
            mapper.handle(failure, &cx)
        }
    }
}
