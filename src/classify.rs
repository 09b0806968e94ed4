//! URL and image-URL classification for raw cell values.
//!
//! Purely syntactic: no network probing, no filesystem access. Image
//! detection is a refinement of URL detection, so `is_image_url(v)` implies
//! `is_url(v)`.

use lazy_static::lazy_static;
use regex::Regex;

/// File extensions treated as images, checked after the query string is
/// stripped and the value lower-cased.
const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico",
];

lazy_static! {
    /// Image-serving URL conventions with no recognizable extension:
    /// well-known path segments, an `.image` suffix, or a `format=` query
    /// parameter naming an image codec. Matched against the original value.
    static ref IMAGE_URL_PATTERNS: Regex = Regex::new(
        r"(?i)(?:/image/|/img/|/photo/|/pic/|\.image$|format=(?:jpg|jpeg|png|gif|webp))"
    )
    .expect("image pattern regex is valid");
}

/// True iff `value` starts with `http://` or `https://`. Scheme matching is
/// case-sensitive; anything else (ftp, data URIs, bare hosts) is not a URL
/// for card purposes.
pub fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// True iff `value` is a URL that syntactically points at an image: either
/// the path ends with a known image extension (query-insensitive,
/// case-insensitive) or the value matches an image-serving convention.
pub fn is_image_url(value: &str) -> bool {
    if !is_url(value) {
        return false;
    }

    let without_query = value.split('?').next().unwrap_or(value);
    let lower = without_query.to_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return true;
    }

    IMAGE_URL_PATTERNS.is_match(value)
}
