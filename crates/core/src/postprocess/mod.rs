//! Post-processing pipeline for derived assets.
//!
//! A [`PostProcessor`] pipes a derived asset through an external
//! optimizer: per-call options are validated up front, unsupported
//! content types pass through unchanged, the payload is materialized
//! into a scoped temporary file, the tool is invoked with a
//! deterministically built argument list, and on success the rewritten
//! file becomes a new payload carrying the original content type. The
//! temporary file is removed on every exit path.
//!
//! # Example
//!
//! ```ignore
//! use pixcache_core::postprocess::{JpegoptimPostProcessor, PostProcessor, ToolConfig};
//!
//! let processor = JpegoptimPostProcessor::new(ToolConfig::new("/usr/bin/jpegoptim"));
//!
//! let options = serde_json::json!({ "quality": 80, "progressive": true });
//! let optimized = processor
//!     .process(binary, options.as_object().unwrap())
//!     .await?;
//! ```

mod config;
mod error;
mod jpegoptim;
mod optipng;
mod options;
mod pngquant;
mod support;
mod traits;

pub use config::ToolConfig;
pub use error::PostProcessError;
pub use jpegoptim::{JpegoptimOptions, JpegoptimPostProcessor};
pub use optipng::{OptipngOptions, OptipngPostProcessor};
pub use pngquant::{DitheringSpec, PngquantOptions, PngquantPostProcessor, QualitySpec};
pub use traits::{PostProcessor, ProcessorOptions};
