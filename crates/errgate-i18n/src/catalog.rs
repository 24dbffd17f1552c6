use std::collections::HashMap;
use std::path::Path;

use errgate_core::Locale;

use crate::CatalogError;

/// Source of localized message templates
pub trait MessageCatalog: Send + Sync {
    /// Template registered for `code`, with locale fallback applied
    fn template(&self, code: &str, locale: &Locale) -> Option<&str>;

    /// First code in `codes` that has a template
    ///
    /// Codes are tried in order; each code goes through the full locale
    /// fallback before the next one is considered.
    fn lookup(&self, codes: &[String], locale: &Locale) -> Option<&str> {
        codes.iter().find_map(|code| self.template(code, locale))
    }
}

/// In-memory catalog of `locale → code → template`
///
/// A lookup for `nl-BE` tries `nl-BE`, then `nl`, then the default locale
/// and its parents, then the root bundle.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    bundles: HashMap<Locale, HashMap<String, String>>,
    default_locale: Option<Locale>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locale consulted after the requested one misses
    #[must_use]
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = Some(locale);
        self
    }

    #[must_use]
    pub fn with_message(mut self, locale: &Locale, code: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(locale, code, template);
        self
    }

    pub fn insert(&mut self, locale: &Locale, code: impl Into<String>, template: impl Into<String>) {
        self.bundles
            .entry(locale.clone())
            .or_default()
            .insert(code.into(), template.into());
    }

    /// Number of templates across all locales
    pub fn len(&self) -> usize {
        self.bundles.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load `<basename>.toml` and `<basename>_<locale>.toml` bundles
    ///
    /// The unsuffixed bundle is the root locale. Nested tables are
    /// flattened into dotted codes, so `[Size] requestBody = ".."` and
    /// `"Size.requestBody" = ".."` register the same code.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a bundle cannot be read, a
    /// bundle is not valid TOML, a message is not a string, or no bundle
    /// with the basename exists
    pub fn from_dir(directory: &Path, basename: &str) -> Result<Self, CatalogError> {
        let io_error = |source: std::io::Error| CatalogError::Io {
            path: directory.to_path_buf(),
            source,
        };

        let mut catalog = Self::new();
        let locale_prefix = format!("{basename}_");

        for entry in std::fs::read_dir(directory).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let locale = if stem == basename {
                Locale::root()
            } else if let Some(tag) = stem.strip_prefix(&locale_prefix) {
                Locale::new(tag)
            } else {
                continue;
            };

            let count = catalog.load_bundle(&path, &locale)?;
            tracing::debug!(path = %path.display(), locale = %locale, messages = count, "message bundle loaded");
        }

        if catalog.bundles.is_empty() {
            return Err(CatalogError::NoBundles {
                directory: directory.to_path_buf(),
                basename: basename.to_owned(),
            });
        }

        Ok(catalog)
    }

    fn load_bundle(&mut self, path: &Path, locale: &Locale) -> Result<usize, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table: toml::Table = toml::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut messages = Vec::new();
        flatten(path, "", table, &mut messages)?;

        let count = messages.len();
        let bundle = self.bundles.entry(locale.clone()).or_default();
        bundle.extend(messages);

        Ok(count)
    }
}

fn flatten(path: &Path, prefix: &str, table: toml::Table, out: &mut Vec<(String, String)>) -> Result<(), CatalogError> {
    for (key, value) in table {
        let code = if prefix.is_empty() { key } else { format!("{prefix}.{key}") };

        match value {
            toml::Value::String(template) => out.push((code, template)),
            toml::Value::Table(nested) => flatten(path, &code, nested, out)?,
            _ => {
                return Err(CatalogError::InvalidValue {
                    path: path.to_path_buf(),
                    key: code,
                });
            }
        }
    }

    Ok(())
}

impl MessageCatalog for StaticCatalog {
    fn template(&self, code: &str, locale: &Locale) -> Option<&str> {
        let requested = locale.lineage();
        let fallback = self.default_locale.as_ref().map(Locale::lineage).unwrap_or_default();
        let root = Locale::root();

        requested
            .iter()
            .chain(fallback.iter())
            .chain(std::iter::once(&root))
            .find_map(|candidate| self.bundles.get(candidate)?.get(code))
            .map(String::as_str)
    }
}
