use std::fmt;
use std::str::FromStr;

/// Language tag used to select localized messages
///
/// Tags are normalized on construction: `_` becomes `-`, the language is
/// lowercased, two-letter regions are uppercased and four-letter scripts
/// are titlecased (`nl_be` → `nl-BE`, `zh-hant-tw` → `zh-Hant-TW`). The
/// empty tag is the root locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// The root locale, matching only unlocalized messages
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Build a locale from a language tag
    pub fn new(tag: &str) -> Self {
        let normalized = tag
            .trim()
            .split(['-', '_'])
            .filter(|part| !part.is_empty())
            .enumerate()
            .map(|(i, part)| normalize_subtag(i, part))
            .collect::<Vec<_>>()
            .join("-");

        Self(normalized)
    }

    /// The normalized tag (empty for the root locale)
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Whether this is the root locale
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// This locale followed by its ancestors, most specific first
    ///
    /// The root locale is not included: `nl-BE` yields `nl-BE`, `nl`.
    pub fn lineage(&self) -> Vec<Self> {
        let mut result = Vec::new();
        let mut current = self.0.as_str();

        while !current.is_empty() {
            result.push(Self(current.to_owned()));
            current = current.rsplit_once('-').map_or("", |(parent, _)| parent);
        }

        result
    }
}

fn normalize_subtag(index: usize, part: &str) -> String {
    if index == 0 {
        return part.to_ascii_lowercase();
    }

    match part.len() {
        2 => part.to_ascii_uppercase(),
        4 => {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
            })
        }
        _ => part.to_ascii_lowercase(),
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("root")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl FromStr for Locale {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
