use std::sync::Arc;

use errgate_core::Locale;
use errgate_i18n::{MessageCatalog, escape_single_quotes, format_message};
use serde_json::Value;

/// A message that is itself looked up in the catalog
///
/// Used as an argument to another message, e.g. to localize the name of
/// the object or field a message talks about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolvable {
    pub codes: Vec<String>,
    pub default: String,
}

impl Resolvable {
    pub fn new(codes: Vec<String>, default: impl Into<String>) -> Self {
        Self {
            codes,
            default: default.into(),
        }
    }

    /// Resolvable with a single code that defaults to the code itself
    pub fn named(name: &str) -> Self {
        Self::new(vec![name.to_owned()], name)
    }
}

/// Argument of a message template
#[derive(Debug, Clone, PartialEq)]
pub enum MessageArg {
    Value(Value),
    Resolvable(Resolvable),
}

impl MessageArg {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }
}

impl From<Value> for MessageArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Resolvable> for MessageArg {
    fn from(resolvable: Resolvable) -> Self {
        Self::Resolvable(resolvable)
    }
}

/// Turns message codes into text using the configured catalog
#[derive(Clone, Default)]
pub struct MessageResolver {
    catalog: Option<Arc<dyn MessageCatalog>>,
}

impl std::fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageResolver")
            .field("catalog", &self.catalog.is_some())
            .finish()
    }
}

impl MessageResolver {
    pub fn new(catalog: Option<Arc<dyn MessageCatalog>>) -> Self {
        Self { catalog }
    }

    /// Resolve a message for `locale`
    ///
    /// Without a catalog the default is returned as is. Otherwise the first
    /// code with a template wins; a template is used verbatim when there
    /// are no arguments. When no code matches, the default is used, and
    /// with arguments it is formatted as a template (after escaping its
    /// single quotes, so the text itself is preserved).
    pub fn resolve(&self, codes: &[String], args: &[MessageArg], default: &str, locale: &Locale) -> String {
        let Some(catalog) = self.catalog.as_deref() else {
            return default.to_owned();
        };

        let template = catalog.lookup(codes, locale);

        if args.is_empty() {
            return template.unwrap_or(default).to_owned();
        }

        let values: Vec<Value> = args.iter().map(|arg| resolve_arg(catalog, arg, locale)).collect();

        match template {
            Some(template) => format_message(template, &values),
            None => format_message(&escape_single_quotes(default), &values),
        }
    }

    pub fn has_catalog(&self) -> bool {
        self.catalog.is_some()
    }
}

fn resolve_arg(catalog: &dyn MessageCatalog, arg: &MessageArg, locale: &Locale) -> Value {
    match arg {
        MessageArg::Value(value) => value.clone(),
        MessageArg::Resolvable(nested) => {
            let text = catalog.lookup(&nested.codes, locale).unwrap_or(nested.default.as_str());
            Value::String(text.to_owned())
        }
    }
}

/// `[code.object, code]`
pub fn message_codes(code: &str, object: &str) -> Vec<String> {
    vec![format!("{code}.{object}"), code.to_owned()]
}

/// Message codes for an error on one field, most specific first
///
/// `[code.object.field, code.object.<field without indices>, code.field,
/// code.<field without indices>, code.<type>, code]` with duplicates
/// removed.
pub fn field_message_codes(code: &str, object: &str, field: &str, field_type: Option<&str>) -> Vec<String> {
    let plain_field = strip_indices(field);

    let mut candidates = vec![
        format!("{code}.{object}.{field}"),
        format!("{code}.{object}.{plain_field}"),
        format!("{code}.{field}"),
        format!("{code}.{plain_field}"),
    ];
    if let Some(field_type) = field_type {
        candidates.push(format!("{code}.{field_type}"));
    }
    candidates.push(code.to_owned());

    let mut codes: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !codes.contains(&candidate) {
            codes.push(candidate);
        }
    }
    codes
}

/// `lines[2].quantity` → `lines.quantity`
fn strip_indices(field: &str) -> String {
    let mut plain = String::with_capacity(field.len());
    let mut depth = 0_usize;

    for c in field.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => plain.push(c),
            _ => {}
        }
    }

    plain
}
