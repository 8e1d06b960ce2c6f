//! Mock post-processor.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::media::MediaBinary;
use crate::postprocess::{PostProcessError, PostProcessor, ProcessorOptions};

/// A recorded post-process call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedProcessCall {
    /// MIME type of the payload that was submitted.
    pub mime_type: String,
    /// The options the call arrived with.
    pub options: ProcessorOptions,
}

/// Mock implementation of the [`PostProcessor`] trait.
///
/// Records every call and either returns the payload with a
/// configurable suffix appended, or fails with an injected error:
///
/// ```rust,ignore
/// use pixcache_core::testing::MockPostProcessor;
///
/// let processor = MockPostProcessor::new();
/// processor.set_output_suffix(b"-optimized").await;
///
/// let result = processor.process(binary, &options).await?;
///
/// let calls = processor.recorded_calls().await;
/// assert_eq!(calls.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockPostProcessor {
    name: String,
    calls: Arc<RwLock<Vec<RecordedProcessCall>>>,
    suffix: Arc<RwLock<Vec<u8>>>,
    next_error: Arc<RwLock<Option<PostProcessError>>>,
}

impl Default for MockPostProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPostProcessor {
    /// Create a new mock post-processor.
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            calls: Arc::new(RwLock::new(Vec::new())),
            suffix: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Bytes appended to every processed payload.
    pub async fn set_output_suffix(&self, suffix: &[u8]) {
        *self.suffix.write().await = suffix.to_vec();
    }

    /// Makes the next call fail with `error`.
    pub async fn fail_next(&self, error: PostProcessError) {
        *self.next_error.write().await = Some(error);
    }

    /// Calls recorded so far.
    pub async fn recorded_calls(&self) -> Vec<RecordedProcessCall> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl PostProcessor for MockPostProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(
        &self,
        binary: MediaBinary,
        options: &ProcessorOptions,
    ) -> Result<MediaBinary, PostProcessError> {
        self.calls.write().await.push(RecordedProcessCall {
            mime_type: binary.mime_type().to_string(),
            options: options.clone(),
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let mut content = binary.content().await?;
        content.extend_from_slice(&self.suffix.read().await);
        Ok(MediaBinary::from_buffer(
            content,
            binary.mime_type().to_string(),
            binary.format().map(str::to_string),
        ))
    }
}
