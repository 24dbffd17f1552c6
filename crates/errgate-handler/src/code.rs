use std::sync::OnceLock;

use errgate_config::CodeStrategy;
use errgate_core::Failure;
use indexmap::IndexMap;
use regex::Regex;

/// Derives the error code of a failure or of a single violation
///
/// Lookups go through the code override table, which holds the built-in
/// defaults with the configured `codes` layered on top.
#[derive(Debug, Clone)]
pub struct CodeResolver {
    codes: IndexMap<String, String>,
    strategy: CodeStrategy,
}

impl CodeResolver {
    pub const fn new(codes: IndexMap<String, String>, strategy: CodeStrategy) -> Self {
        Self { codes, strategy }
    }

    /// Code of a failure as a whole
    ///
    /// A code declared by the failure type wins, then an override for its
    /// type key, then the configured strategy.
    pub fn resolve_code(&self, failure: &dyn Failure) -> String {
        if let Some(code) = failure.declared_code() {
            return code;
        }

        if let Some(code) = self.codes.get(failure.type_key()) {
            return code.clone();
        }

        match self.strategy {
            CodeStrategy::FullQualifiedName => failure.type_key().to_owned(),
            CodeStrategy::AllCaps => all_caps(failure.simple_name()),
        }
    }

    /// Code of a violation on `path`: `path.base` override, `base` override,
    /// or `base` itself
    pub fn resolve_field_code(&self, path: &str, base: &str) -> String {
        self.codes
            .get(&format!("{path}.{base}"))
            .or_else(|| self.codes.get(base))
            .map_or_else(|| base.to_owned(), Clone::clone)
    }

    /// Override for `code`, or `code` itself
    pub fn resolve_bare_code(&self, code: &str) -> String {
        self.codes.get(code).map_or_else(|| code.to_owned(), Clone::clone)
    }

    pub const fn strategy(&self) -> CodeStrategy {
        self.strategy
    }
}

/// Upper snake case form of a type name, without an `Exception` suffix
///
/// `MyCustomException` becomes `MY_CUSTOM`, `OrderNotFoundError` becomes
/// `ORDER_NOT_FOUND_ERROR`. Applying it to its own output is a no-op.
pub fn all_caps(simple_name: &str) -> String {
    fn boundary() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new("([a-z])([A-Z]+)").expect("case boundary pattern is valid"))
    }

    let base = simple_name.strip_suffix("Exception").unwrap_or(simple_name);
    boundary().replace_all(base, "${1}_${2}").to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct MyCustomException;

    impl Failure for MyCustomException {}

    #[derive(Debug, thiserror::Error)]
    #[error("declared")]
    struct DeclaredError;

    impl Failure for DeclaredError {
        fn declared_code(&self) -> Option<String> {
            Some("ORDER_GONE".to_owned())
        }
    }

    fn resolver(entries: &[(&str, &str)], strategy: CodeStrategy) -> CodeResolver {
        let codes = entries.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        CodeResolver::new(codes, strategy)
    }

    #[test]
    fn all_caps_examples() {
        assert_eq!(all_caps("MyCustomException"), "MY_CUSTOM");
        assert_eq!(all_caps("OrderNotFoundError"), "ORDER_NOT_FOUND_ERROR");
        assert_eq!(all_caps("HTTPClientException"), "HTTPCLIENT");
        assert_eq!(all_caps("userIDMissing"), "USER_IDMISSING");
        assert_eq!(all_caps("Exception"), "");
    }

    #[test]
    fn all_caps_is_idempotent() {
        for name in ["MyCustomException", "OrderNotFoundError", "TypeMismatch", "AccessDenied", "X", "already_SNAKE"] {
            let once = all_caps(name);
            assert_eq!(all_caps(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn strategy_applies_without_override() {
        let failure = MyCustomException;
        assert_eq!(resolver(&[], CodeStrategy::AllCaps).resolve_code(&failure), "MY_CUSTOM");

        let fqn = resolver(&[], CodeStrategy::FullQualifiedName).resolve_code(&failure);
        assert!(fqn.ends_with("::MyCustomException"));
    }

    #[test]
    fn type_key_override_beats_strategy() {
        let failure = MyCustomException;
        let key = failure.type_key().to_owned();
        let resolver = resolver(&[(key.as_str(), "CUSTOM")], CodeStrategy::AllCaps);
        assert_eq!(resolver.resolve_code(&failure), "CUSTOM");
    }

    #[test]
    fn declared_code_beats_override() {
        let failure = DeclaredError;
        let key = failure.type_key().to_owned();
        let resolver = resolver(&[(key.as_str(), "CONFIGURED")], CodeStrategy::AllCaps);
        assert_eq!(resolver.resolve_code(&failure), "ORDER_GONE");
    }

    #[test]
    fn field_code_precedence() {
        let resolver = resolver(
            &[("NotBlank", "REQUIRED"), ("email.NotBlank", "EMAIL_REQUIRED")],
            CodeStrategy::AllCaps,
        );
        assert_eq!(resolver.resolve_field_code("email", "NotBlank"), "EMAIL_REQUIRED");
        assert_eq!(resolver.resolve_field_code("name", "NotBlank"), "REQUIRED");
        assert_eq!(resolver.resolve_field_code("name", "Pattern"), "Pattern");
        assert_eq!(resolver.resolve_bare_code("NotBlank"), "REQUIRED");
        assert_eq!(resolver.resolve_bare_code("ValuesEqual"), "ValuesEqual");
    }
}
