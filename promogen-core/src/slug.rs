//! Title to folder-name slugs.

/// Slug used when a title has no usable characters.
pub const FALLBACK_SLUG: &str = "event";

/// Turn an event title into a lowercase, hyphen-separated ASCII slug.
///
/// `&` becomes `and`, punctuation is dropped (so `Don't` gives `dont`),
/// non-ASCII letters are transliterated, and runs of whitespace,
/// underscores or hyphens collapse into one hyphen. Never empty.
pub fn slugify(title: &str) -> String {
    let words: String = title
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect();

    let slug = ::slug::slugify(words);

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// True when `s` is already in the form `slugify` produces.
pub fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && !s.ends_with('-')
        && !s.contains("--")
        && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
