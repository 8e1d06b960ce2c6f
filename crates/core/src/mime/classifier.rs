//! Classifier over registered guessers.

use std::sync::Arc;

use thiserror::Error;

use crate::media::{BinarySource, MediaBinary};

use super::traits::MimeGuesser;

/// Errors raised by the content type classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A registered guesser supports neither recognized shape.
    #[error("guesser \"{name}\" implements no recognized guessing capability")]
    UnsupportedGuesser { name: String },

    /// No guesser was registered at all.
    #[error("at least one guesser must be registered")]
    NoGuesserRegistered,

    /// I/O error while reading a file-backed payload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Classifies payload content types via registered guessers.
///
/// The first registered guesser serves every request; later
/// registrants are validated but only act as documentation of the
/// intended fallback order for operators swapping the list.
pub struct ContentTypeClassifier {
    guessers: Vec<Arc<dyn MimeGuesser>>,
}

impl std::fmt::Debug for ContentTypeClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentTypeClassifier")
            .field("guessers", &self.guessers.iter().map(|g| g.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl ContentTypeClassifier {
    /// Creates a classifier over the given guessers.
    ///
    /// Fails fast when the list is empty or when any registrant
    /// advertises neither guessing shape.
    pub fn new(guessers: Vec<Arc<dyn MimeGuesser>>) -> Result<Self, ClassifierError> {
        if guessers.is_empty() {
            return Err(ClassifierError::NoGuesserRegistered);
        }
        for guesser in &guessers {
            if !guesser.supports_content() && !guesser.supports_path() {
                return Err(ClassifierError::UnsupportedGuesser {
                    name: guesser.name().to_string(),
                });
            }
        }
        Ok(Self { guessers })
    }

    /// Creates a classifier over a single guesser.
    pub fn with_guesser(guesser: Arc<dyn MimeGuesser>) -> Result<Self, ClassifierError> {
        Self::new(vec![guesser])
    }

    fn primary(&self) -> &dyn MimeGuesser {
        self.guessers[0].as_ref()
    }

    /// Guesses the MIME type of raw content bytes.
    ///
    /// Returns `None` when the serving guesser cannot classify the
    /// bytes or only supports the path shape.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Option<String> {
        let guesser = self.primary();
        if guesser.supports_content() {
            guesser.guess_content(bytes)
        } else {
            None
        }
    }

    /// Guesses the MIME type of a payload.
    ///
    /// File-backed payloads use the path shape when the serving
    /// guesser supports it, otherwise the file is read and classified
    /// by content. `None` means the type could not be determined.
    pub async fn classify(
        &self,
        binary: &MediaBinary,
    ) -> Result<Option<String>, ClassifierError> {
        let guesser = self.primary();
        match binary.source() {
            BinarySource::Buffer(data) => Ok(self.classify_bytes(data)),
            BinarySource::File(path) => {
                if guesser.supports_path() {
                    return Ok(guesser.guess_path(path));
                }
                let bytes = tokio::fs::read(path).await?;
                Ok(guesser.guess_content(&bytes))
            }
        }
    }
}
