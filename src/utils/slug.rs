use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("slug character pattern is valid"));

/// Derive a URL-safe slug from a human-entered title or name.
///
/// Lowercases the input, collapses every run of whitespace into a single
/// hyphen, then drops anything that is not `a-z`, `0-9` or `-`. Always
/// returns a string (possibly empty). Slugs are recomputed whenever the
/// source title changes, so they are not stable across renames.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG_CHARS.replace_all(&hyphenated, "").into_owned()
}

/// True when the slug has at least one letter or digit.
pub fn is_addressable(slug: &str) -> bool {
    slug.chars().any(|c| c.is_ascii_alphanumeric())
}
