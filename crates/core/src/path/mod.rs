//! Cache path and URL resolution for derived assets.
//!
//! [`codec`] holds the pure composition rules mapping an asset
//! identifier and filter name to a relative cache path. The
//! [`WebPathResolver`] composes them with a web root and cache prefix
//! to produce absolute filesystem paths and public URL paths.

pub mod codec;

mod resolver;

pub use resolver::{PathResolver, ResolverError, WebPathResolver, DEFAULT_CACHE_PREFIX};
