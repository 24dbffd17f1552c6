//! Localized message templates for errgate
//!
//! A [`MessageCatalog`] maps message codes to templates per locale.
//! Templates use positional placeholders (`{0}`, `{1}`) and single quotes
//! for literal text, see [`format_message`].

#![allow(clippy::must_use_candidate)]

mod catalog;
mod error;
mod format;

pub use catalog::{MessageCatalog, StaticCatalog};
pub use error::CatalogError;
pub use format::{escape_single_quotes, format_message};
