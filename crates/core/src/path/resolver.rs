//! Public-facing path resolver.

use thiserror::Error;

use super::codec;

/// Default cache prefix under the web root.
pub const DEFAULT_CACHE_PREFIX: &str = "media/cache";

/// Errors raised when constructing a resolver.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The web root directory was empty after normalization.
    #[error("web root directory cannot be empty")]
    EmptyWebRoot,
}

/// Resolves cache locations for `(asset identifier, filter)` pairs.
pub trait PathResolver: Send + Sync {
    /// Absolute filesystem path of the cached asset.
    fn file_path(&self, asset_id: &str, filter: &str) -> String;

    /// Absolute URL path of the cached asset (leading separator
    /// included, web root omitted).
    fn file_url(&self, asset_id: &str, filter: &str) -> String;

    /// Root directory holding every cached asset.
    fn cache_root(&self) -> &str;
}

/// Resolver composing a web root directory with a cache prefix.
#[derive(Debug, Clone)]
pub struct WebPathResolver {
    web_root: String,
    cache_prefix: String,
    cache_root: String,
}

impl WebPathResolver {
    /// Creates a resolver for the given web root and cache prefix.
    ///
    /// Doubled separators are collapsed; the web root loses trailing
    /// separators and the prefix loses leading ones.
    pub fn new(
        web_root: impl Into<String>,
        cache_prefix: impl Into<String>,
    ) -> Result<Self, ResolverError> {
        let web_root = codec::collapse_separators(&web_root.into())
            .trim_end_matches('/')
            .to_string();
        if web_root.is_empty() {
            return Err(ResolverError::EmptyWebRoot);
        }

        let cache_prefix = codec::collapse_separators(&cache_prefix.into())
            .trim_start_matches('/')
            .to_string();
        let cache_root = format!("{web_root}/{cache_prefix}");

        Ok(Self {
            web_root,
            cache_prefix,
            cache_root,
        })
    }

    /// Creates a resolver with the default `media/cache` prefix.
    pub fn with_default_prefix(web_root: impl Into<String>) -> Result<Self, ResolverError> {
        Self::new(web_root, DEFAULT_CACHE_PREFIX)
    }

    /// Returns the cache prefix in effect.
    pub fn cache_prefix(&self) -> &str {
        &self.cache_prefix
    }

    /// Resolves the public URL path of a cached asset.
    ///
    /// Alias of [`PathResolver::file_url`] kept as the entry point for
    /// callers that only consume URLs.
    pub fn resolve(&self, asset_id: &str, filter: &str) -> String {
        self.file_url(asset_id, filter)
    }
}

impl PathResolver for WebPathResolver {
    fn file_path(&self, asset_id: &str, filter: &str) -> String {
        format!(
            "{}/{}",
            self.web_root,
            codec::encode_path(asset_id, filter, &self.cache_prefix)
        )
    }

    fn file_url(&self, asset_id: &str, filter: &str) -> String {
        format!(
            "/{}",
            codec::encode_url(asset_id, filter, &self.cache_prefix)
        )
    }

    fn cache_root(&self) -> &str {
        &self.cache_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_and_url() {
        let resolver = WebPathResolver::new("/srv/web", "media/cache").unwrap();
        assert_eq!(
            resolver.file_path("a/b.jpg", "thumb"),
            "/srv/web/media/cache/thumb/a/b.jpg"
        );
        assert_eq!(
            resolver.file_url("a/b.jpg", "thumb"),
            "/media/cache/thumb/a/b.jpg"
        );
        assert_eq!(resolver.cache_root(), "/srv/web/media/cache");
    }

    #[test]
    fn test_resolve_is_file_url() {
        let resolver = WebPathResolver::with_default_prefix("/srv/web").unwrap();
        assert_eq!(
            resolver.resolve("a.jpg", "thumb"),
            resolver.file_url("a.jpg", "thumb")
        );
    }

    #[test]
    fn test_empty_web_root_rejected() {
        assert!(matches!(
            WebPathResolver::new("", "media/cache"),
            Err(ResolverError::EmptyWebRoot)
        ));
        // A web root consisting only of separators normalizes to empty.
        assert!(matches!(
            WebPathResolver::new("///", "media/cache"),
            Err(ResolverError::EmptyWebRoot)
        ));
    }

    #[test]
    fn test_separator_normalization() {
        let resolver = WebPathResolver::new("/srv//web/", "/media//cache").unwrap();
        assert_eq!(
            resolver.file_path("a.jpg", "thumb"),
            "/srv/web/media/cache/thumb/a.jpg"
        );
    }

    #[test]
    fn test_scheme_injection_neutralized_in_urls() {
        let resolver = WebPathResolver::with_default_prefix("/srv/web").unwrap();
        let url = resolver.file_url("https://cdn.example.com/a.jpg", "thumb");
        assert_eq!(url, "/media/cache/thumb/https---cdn.example.com/a.jpg");
    }
}
