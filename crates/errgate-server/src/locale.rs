use errgate_core::Locale;
use http::HeaderMap;
use http::header::ACCEPT_LANGUAGE;

/// Locale of the first `Accept-Language` tag
///
/// Quality values are ignored. A missing header, an empty tag or `*`
/// yields the root locale.
pub fn request_locale(headers: &HeaderMap) -> Locale {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|tag| tag.split_once(';').map_or(tag, |(tag, _)| tag).trim())
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .map_or_else(Locale::root, Locale::new)
}
