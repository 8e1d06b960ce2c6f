//! Pure path composition rules.
//!
//! All functions here are total and free of I/O: the same inputs
//! always produce the same output.

/// Replacement for URL-scheme separators embedded in asset identifiers.
const SCHEME_PLACEHOLDER: &str = "---";

/// Neutralizes URL-scheme-like substrings in an asset identifier and
/// strips leading separators so the identifier can be embedded in a
/// cache path without being parsed as an absolute URL or escaping the
/// cache root.
pub fn sanitize_identifier(asset_id: &str) -> String {
    asset_id
        .replace("://", SCHEME_PLACEHOLDER)
        .trim_start_matches('/')
        .to_string()
}

/// Composes the relative cache path for `(asset_id, filter)` under
/// `cache_prefix`.
///
/// An empty `asset_id` yields a path ending at `cache_prefix/filter/`;
/// rejecting empty identifiers is the caller's concern.
pub fn encode_path(asset_id: &str, filter: &str, cache_prefix: &str) -> String {
    let joined = format!(
        "{}/{}/{}",
        cache_prefix.trim_matches('/'),
        filter.trim_matches('/'),
        sanitize_identifier(asset_id)
    );
    collapse_separators(&joined)
}

/// Composes the relative cache URL path for `(asset_id, filter)`.
///
/// Identical to [`encode_path`] except filesystem separators are
/// normalized to URL path separators.
pub fn encode_url(asset_id: &str, filter: &str, cache_prefix: &str) -> String {
    url_path(&encode_path(asset_id, filter, cache_prefix))
}

/// Converts a filesystem path into a URL path.
pub fn url_path(path: &str) -> String {
    path.replace(std::path::MAIN_SEPARATOR, "/")
}

/// Collapses doubled separators into single ones.
pub(crate) fn collapse_separators(path: &str) -> String {
    let mut collapsed = path.to_string();
    while collapsed.contains("//") {
        collapsed = collapsed.replace("//", "/");
    }
    collapsed
}
