//! Cache location resolution and external post-processing for derived
//! image assets.
//!
//! The crate maps `(asset identifier, filter name)` pairs to canonical
//! cache paths and public URLs, and pipes derived assets through
//! external optimizer tools (`jpegoptim`, `optipng`, `pngquant`) with
//! scoped temporary files, timeouts, and typed failure reporting.

pub mod config;
pub mod media;
pub mod metrics;
pub mod mime;
pub mod notify;
pub mod path;
pub mod postprocess;
pub mod process;
pub mod testing;
pub mod tmpfile;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, PostProcessConfig,
    ResolverConfig,
};
pub use media::{BinarySource, MediaBinary};
pub use mime::{
    ClassifierError, ContentTypeClassifier, ExtensionGuesser, InferGuesser, MimeGuesser,
};
pub use notify::CacheResolved;
pub use path::{PathResolver, ResolverError, WebPathResolver, DEFAULT_CACHE_PREFIX};
pub use postprocess::{
    JpegoptimOptions, JpegoptimPostProcessor, OptipngOptions, OptipngPostProcessor,
    PngquantOptions, PngquantPostProcessor, PostProcessError, PostProcessor, ProcessorOptions,
    ToolConfig,
};
pub use process::{ProcessError, ProcessOutcome, ProcessRunner, RunOptions};
pub use tmpfile::{TempFile, TempFileError, TempFileManager};
