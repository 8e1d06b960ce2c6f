//! optipng-based PNG post-processor.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::media::MediaBinary;
use crate::metrics;
use crate::process::{RunOptions, DEFAULT_ERROR_MARKERS, DEFAULT_VALID_EXIT_CODES};
use crate::tmpfile::TempFileManager;

use super::config::ToolConfig;
use super::error::PostProcessError;
use super::options::parse_options;
use super::support::ToolInvocation;
use super::traits::{PostProcessor, ProcessorOptions};

const SUPPORTED_TYPES: &[&str] = &["image/png"];

/// Post-processor piping PNG payloads through `optipng`.
#[derive(Debug, Clone)]
pub struct OptipngPostProcessor {
    config: ToolConfig,
    temp_files: TempFileManager,
}

/// Recognized per-call options for [`OptipngPostProcessor`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptipngOptions {
    /// Optimization level, 0 to 7.
    pub level: i64,

    /// Strip all metadata chunks from the output.
    pub strip_all: bool,

    /// Cut one image out of multi-image files.
    pub snip: bool,

    /// Preserve file attributes where possible.
    pub preserve_attributes: bool,

    /// PNG interlace type, 0 or 1.
    pub interlace_type: Option<i64>,

    /// Disable bit-depth reductions.
    pub no_bit_depth_reductions: bool,

    /// Disable color-type reductions.
    pub no_color_type_reductions: bool,

    /// Disable palette reductions.
    pub no_palette_reductions: bool,

    /// Per-call temporary root override.
    pub temp_dir: Option<PathBuf>,

    /// External process controls.
    pub process: RunOptions,
}

impl Default for OptipngOptions {
    fn default() -> Self {
        Self {
            level: 7,
            strip_all: true,
            snip: false,
            preserve_attributes: false,
            interlace_type: None,
            no_bit_depth_reductions: false,
            no_color_type_reductions: false,
            no_palette_reductions: false,
            temp_dir: None,
            process: RunOptions::default(),
        }
    }
}

impl OptipngOptions {
    fn validate(&self) -> Result<(), PostProcessError> {
        if !(0..=7).contains(&self.level) {
            return Err(PostProcessError::invalid_option(
                "the \"level\" option must be an int between 0 and 7",
            ));
        }
        if let Some(interlace) = self.interlace_type {
            if !(0..=1).contains(&interlace) {
                return Err(PostProcessError::invalid_option(
                    "the \"interlace_type\" option must be either 0 or 1",
                ));
            }
        }
        Ok(())
    }
}

impl OptipngPostProcessor {
    /// Creates a processor for the given tool configuration.
    pub fn new(config: ToolConfig) -> Self {
        let temp_files = TempFileManager::new(config.temp_dir.clone());
        Self { config, temp_files }
    }

    /// Creates a processor expecting `optipng` on the search path.
    pub fn with_defaults() -> Self {
        Self::new(ToolConfig::new("optipng"))
    }

    fn parse(options: &ProcessorOptions) -> Result<OptipngOptions, PostProcessError> {
        let parsed: OptipngOptions = parse_options(options)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Builds the argument vector for a validated option set.
    fn command_args(&self, options: &OptipngOptions, target: &Path) -> Vec<String> {
        let mut args = vec![
            self.config.executable.display().to_string(),
            format!("-o{}", options.level),
        ];
        if options.strip_all {
            args.push("-strip".to_string());
            args.push("all".to_string());
        }
        if options.snip {
            args.push("-snip".to_string());
        }
        if options.preserve_attributes {
            args.push("-preserve".to_string());
        }
        if let Some(interlace) = options.interlace_type {
            args.push(format!("-i{interlace}"));
        }
        if options.no_bit_depth_reductions {
            args.push("-nb".to_string());
        }
        if options.no_color_type_reductions {
            args.push("-nc".to_string());
        }
        if options.no_palette_reductions {
            args.push("-np".to_string());
        }
        args.push(target.display().to_string());
        args
    }
}

#[async_trait]
impl PostProcessor for OptipngPostProcessor {
    fn name(&self) -> &str {
        "optipng"
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
                "content type not supported by optipng, passing payload through"
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
