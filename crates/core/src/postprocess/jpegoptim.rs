//! jpegoptim-based JPEG post-processor.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::media::MediaBinary;
use crate::metrics;
use crate::process::{RunOptions, DEFAULT_ERROR_MARKERS, DEFAULT_VALID_EXIT_CODES};
use crate::tmpfile::TempFileManager;

use super::config::ToolConfig;
use super::error::PostProcessError;
use super::options::parse_options;
use super::support::ToolInvocation;
use super::traits::{PostProcessor, ProcessorOptions};

const SUPPORTED_TYPES: &[&str] = &["image/jpeg", "image/jpg"];

/// Post-processor piping JPEG payloads through `jpegoptim`.
#[derive(Debug, Clone)]
pub struct JpegoptimPostProcessor {
    config: ToolConfig,
    temp_files: TempFileManager,
}

/// Recognized per-call options for [`JpegoptimPostProcessor`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JpegoptimOptions {
    /// Strip all markers from the output.
    pub strip_all: bool,

    /// Maximum quality factor, 0 to 100.
    pub quality: Option<i64>,

    /// Deprecated alias of `quality`.
    pub max: Option<i64>,

    /// Force all output to be progressive (normal otherwise).
    pub progressive: bool,

    /// Per-call temporary root override.
    pub temp_dir: Option<PathBuf>,

    /// External process controls.
    pub process: RunOptions,
}

impl Default for JpegoptimOptions {
    fn default() -> Self {
        Self {
            strip_all: true,
            quality: None,
            max: None,
            progressive: true,
            temp_dir: None,
            process: RunOptions::default(),
        }
    }
}

impl JpegoptimOptions {
    /// Effective quality ceiling, honoring the deprecated alias.
    fn quality_ceiling(&self) -> Option<i64> {
        self.quality.or(self.max)
    }

    fn validate(&self) -> Result<(), PostProcessError> {
        if self.max.is_some() {
            warn!("the \"max\" option is deprecated, use \"quality\" instead");
            if self.quality.is_some() {
                return Err(PostProcessError::invalid_option(
                    "the \"max\" and \"quality\" options cannot both be set",
                ));
            }
        }
        if let Some(quality) = self.quality_ceiling() {
            if !(0..=100).contains(&quality) {
                return Err(PostProcessError::invalid_option(
                    "the \"quality\" option must be an int between 0 and 100",
                ));
            }
        }
        Ok(())
    }
}

impl JpegoptimPostProcessor {
    /// Creates a processor for the given tool configuration.
    pub fn new(config: ToolConfig) -> Self {
        let temp_files = TempFileManager::new(config.temp_dir.clone());
        Self { config, temp_files }
    }

    /// Creates a processor expecting `jpegoptim` on the search path.
    pub fn with_defaults() -> Self {
        Self::new(ToolConfig::new("jpegoptim"))
    }

    fn parse(options: &ProcessorOptions) -> Result<JpegoptimOptions, PostProcessError> {
        let parsed: JpegoptimOptions = parse_options(options)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Builds the argument vector for a validated option set.
    ///
    /// Ordering is stable: strip marker, quality ceiling, progressive
    /// mode, target path.
    fn command_args(&self, options: &JpegoptimOptions, target: &Path) -> Vec<String> {
        let mut args = vec![self.config.executable.display().to_string()];
        if options.strip_all {
            args.push("--strip-all".to_string());
        }
        if let Some(quality) = options.quality_ceiling() {
            args.push(format!("--max={quality}"));
        }
        if options.progressive {
            args.push("--all-progressive".to_string());
        } else {
            args.push("--all-normal".to_string());
        }
        args.push(target.display().to_string());
        args
    }
}

#[async_trait]
impl PostProcessor for JpegoptimPostProcessor {
    fn name(&self) -> &str {
        "jpegoptim"
    }

    async fn process(
        &self,
        binary: MediaBinary,
        options: &ProcessorOptions,
    ) -> Result<MediaBinary, PostProcessError> {
        let parsed = Self::parse(options)?;

        if !binary.is_type_match(SUPPORTED_TYPES) {
            debug!(
                mime_type = binary.mime_type(),
                "content type not supported by jpegoptim, passing payload through"
            );
            metrics::POST_PROCESS_RUNS
                .with_label_values(&[self.name(), "skipped"])
                .inc();
            return Ok(binary);
        }

        let content = ToolInvocation {
            processor: self.name(),
            temp_files: &self.temp_files,
            binary: &binary,
            temp_dir_override: parsed.temp_dir.as_deref(),
            run_options: &parsed.process,
            valid_exit_codes: DEFAULT_VALID_EXIT_CODES,
            error_markers: DEFAULT_ERROR_MARKERS,
            build_command: |target: &Path| self.command_args(&parsed, target),
        }
        .run()
        .await?;

        Ok(MediaBinary::from_buffer(
            content,
            binary.mime_type().to_string(),
            binary.format().map(str::to_string),
        ))
    }
}
