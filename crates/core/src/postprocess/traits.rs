//! Trait definitions for post-processors.

use async_trait::async_trait;

use crate::media::MediaBinary;

use super::error::PostProcessError;

/// Per-call option map passed to [`PostProcessor::process`].
///
/// Filter configurations arrive as loosely typed maps; each processor
/// deserializes the keys it recognizes into a typed option struct and
/// validates them before touching any resource. Unrecognized keys are
/// ignored.
pub type ProcessorOptions = serde_json::Map<String, serde_json::Value>;

/// A pipeline stage that runs an external tool over a derived asset.
#[async_trait]
pub trait PostProcessor: Send + Sync {
    /// Returns the name of this post-processor implementation.
    fn name(&self) -> &str;

    /// Runs the post-processor over `binary` and returns the resulting
    /// payload.
    ///
    /// Payloads whose content type is not supported by this processor
    /// are returned unchanged; this pass-through is deliberate and is
    /// not an error.
    async fn process(
        &self,
        binary: MediaBinary,
        options: &ProcessorOptions,
    ) -> Result<MediaBinary, PostProcessError>;
}
