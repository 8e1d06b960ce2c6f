//! pngquant-based PNG post-processor.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::media::MediaBinary;
use crate::metrics;
use crate::process::RunOptions;
use crate::tmpfile::TempFileManager;

use super::config::ToolConfig;
use super::error::PostProcessError;
use super::options::parse_options;
use super::support::ToolInvocation;
use super::traits::{PostProcessor, ProcessorOptions};

const SUPPORTED_TYPES: &[&str] = &["image/png"];

// 98 and 99 mean the quantized result would be larger than the input
// or the quality floor was not reached; the tool still leaves a usable
// file behind, so both count as success.
const VALID_EXIT_CODES: &[i32] = &[0, 98, 99];
const ERROR_MARKERS: &[&str] = &[];

/// Post-processor piping PNG payloads through `pngquant`.
#[derive(Debug, Clone)]
pub struct PngquantPostProcessor {
    config: ToolConfig,
    temp_files: TempFileManager,
}

/// Quality constraint: a single ceiling or a `"min-max"` range.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QualitySpec {
    Range(String),
    Ceiling(i64),
}

/// Dithering control: on/off or a Floyd-Steinberg level in [0, 1].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DitheringSpec {
    Enabled(bool),
    Level(f64),
}

/// Recognized per-call options for [`PngquantPostProcessor`].
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PngquantOptions {
    /// Quality constraint; integers become a `0-N` range.
    pub quality: Option<QualitySpec>,

    /// Speed/quality trade-off, 1 (slowest) to 11 (fastest).
    pub speed: Option<i64>,

    /// Dithering control.
    pub dithering: Option<DitheringSpec>,

    /// Per-call temporary root override.
    pub temp_dir: Option<PathBuf>,

    /// External process controls.
    pub process: RunOptions,
}

impl PngquantOptions {
    /// Normalized `min-max` quality range, if constrained.
    fn quality_range(&self) -> Result<Option<String>, PostProcessError> {
        let spec = match &self.quality {
            None => return Ok(None),
            Some(spec) => spec,
        };
        match spec {
            QualitySpec::Ceiling(ceiling) => {
                if !(0..=100).contains(ceiling) {
                    return Err(PostProcessError::invalid_option(
                        "the \"quality\" option must be an int between 0 and 100",
                    ));
                }
                Ok(Some(format!("0-{ceiling}")))
            }
            QualitySpec::Range(range) => {
                let bounds: Vec<&str> = range.split('-').collect();
                let parsed: Option<(i64, i64)> = match bounds.as_slice() {
                    [min, max] => min.parse().ok().zip(max.parse().ok()),
                    _ => None,
                };
                match parsed {
                    Some((min, max))
                        if (0..=100).contains(&min) && (0..=100).contains(&max) && min <= max =>
                    {
                        Ok(Some(range.clone()))
                    }
                    _ => Err(PostProcessError::invalid_option(
                        "the \"quality\" option must be a \"min-max\" range within 0 and 100",
                    )),
                }
            }
        }
    }

    fn validate(&self) -> Result<(), PostProcessError> {
        self.quality_range()?;
        if let Some(speed) = self.speed {
            if !(1..=11).contains(&speed) {
                return Err(PostProcessError::invalid_option(
                    "the \"speed\" option must be an int between 1 and 11",
                ));
            }
        }
        if let Some(DitheringSpec::Level(level)) = &self.dithering {
            if !(0.0..=1.0).contains(level) {
                return Err(PostProcessError::invalid_option(
                    "the \"dithering\" option must be a bool or a float between 0 and 1",
                ));
            }
        }
        Ok(())
    }
}

impl PngquantPostProcessor {
    /// Creates a processor for the given tool configuration.
    pub fn new(config: ToolConfig) -> Self {
        let temp_files = TempFileManager::new(config.temp_dir.clone());
        Self { config, temp_files }
    }

    /// Creates a processor expecting `pngquant` on the search path.
    pub fn with_defaults() -> Self {
        Self::new(ToolConfig::new("pngquant"))
    }

    fn parse(options: &ProcessorOptions) -> Result<PngquantOptions, PostProcessError> {
        let parsed: PngquantOptions = parse_options(options)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Builds the argument vector for a validated option set.
    ///
    /// The tool rewrites the temporary file in place via `--force
    /// --output <target> <target>`.
    fn command_args(&self, options: &PngquantOptions, target: &Path) -> Vec<String> {
        let mut args = vec![self.config.executable.display().to_string()];

        // validate() ran before this point, the range cannot fail here
        if let Ok(Some(range)) = options.quality_range() {
            args.push("--quality".to_string());
            args.push(range);
        }

        args.push("--speed".to_string());
        args.push(options.speed.unwrap_or(3).to_string());

        match &options.dithering {
            Some(DitheringSpec::Enabled(false)) => args.push("--nofs".to_string()),
            Some(DitheringSpec::Level(level)) => args.push(format!("--floyd={level}")),
            Some(DitheringSpec::Enabled(true)) | None => {}
        }

        args.push("--force".to_string());
        args.push("--output".to_string());
        args.push(target.display().to_string());
        args.push(target.display().to_string());
        args
    }
}

#[async_trait]
impl PostProcessor for PngquantPostProcessor {
    fn name(&self) -> &str {
        "pngquant"
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
                "content type not supported by pngquant, passing payload through"
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
            valid_exit_codes: VALID_EXIT_CODES,
            error_markers: ERROR_MARKERS,
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

#[cfg(test)]
mod tests {
    use super::*;

    fn options(value: serde_json::Value) -> ProcessorOptions {
        value.as_object().cloned().unwrap()
    }

    fn args_for(value: serde_json::Value) -> Vec<String> {
        let processor = PngquantPostProcessor::new(ToolConfig::new("pngquant"));
        let parsed = PngquantPostProcessor::parse(&options(value)).unwrap();
        processor.command_args(&parsed, Path::new("/tmp/target.png"))
    }

    #[test]
    fn test_default_arguments() {
        assert_eq!(
            args_for(serde_json::json!({})),
            vec![
                "pngquant",
                "--speed",
                "3",
                "--force",
                "--output",
                "/tmp/target.png",
                "/tmp/target.png"
            ]
        );
    }

    #[test]
    fn test_quality_ceiling_becomes_range() {
        let args = args_for(serde_json::json!({"quality": 80}));
        let position = args.iter().position(|a| a == "--quality").unwrap();
        assert_eq!(args[position + 1], "0-80");
    }

    #[test]
    fn test_quality_range_passed_through() {
        let args = args_for(serde_json::json!({"quality": "65-80"}));
        let position = args.iter().position(|a| a == "--quality").unwrap();
        assert_eq!(args[position + 1], "65-80");
    }

    #[test]
    fn test_dithering_flags() {
        assert!(args_for(serde_json::json!({"dithering": false}))
            .contains(&"--nofs".to_string()));
        assert!(args_for(serde_json::json!({"dithering": 0.5}))
            .contains(&"--floyd=0.5".to_string()));
        assert!(!args_for(serde_json::json!({"dithering": true}))
            .iter()
            .any(|a| a.starts_with("--nofs") || a.starts_with("--floyd")));
    }

    #[test]
    fn test_invalid_quality_rejected() {
        for value in [
            serde_json::json!({"quality": 101}),
            serde_json::json!({"quality": "80-65"}),
            serde_json::json!({"quality": "0-200"}),
            serde_json::json!({"quality": "bad"}),
        ] {
            let result = PngquantPostProcessor::parse(&options(value));
            assert!(matches!(
                result,
                Err(PostProcessError::InvalidOption { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let result = PngquantPostProcessor::parse(&options(serde_json::json!({"speed": 0})));
        assert!(matches!(
            result,
            Err(PostProcessError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_invalid_dithering_level_rejected() {
        let result =
            PngquantPostProcessor::parse(&options(serde_json::json!({"dithering": 1.5})));
        assert!(matches!(
            result,
            Err(PostProcessError::InvalidOption { .. })
        ));
    }

    #[tokio::test]
    async fn test_jpeg_passes_through() {
        let processor = PngquantPostProcessor::with_defaults();
        let binary = MediaBinary::from_buffer(b"jpeg".to_vec(), "image/jpeg", None);
        let result = processor
            .process(binary.clone(), &ProcessorOptions::new())
            .await
            .unwrap();
        assert_eq!(result, binary);
    }
}
