//! Mock MIME guesser.

use std::path::Path;

use crate::mime::MimeGuesser;

/// Mock implementation of the [`MimeGuesser`] trait.
///
/// Capabilities and the canned answer are fixed at construction:
///
/// ```rust,ignore
/// use pixcache_core::testing::MockGuesser;
///
/// let guesser = MockGuesser::content(Some("image/png"));
/// assert_eq!(guesser.guess_content(b"..."), Some("image/png".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct MockGuesser {
    name: String,
    content_capable: bool,
    path_capable: bool,
    answer: Option<String>,
}

impl MockGuesser {
    /// A guesser advertising the content-bytes shape.
    pub fn content(answer: Option<&str>) -> Self {
        Self {
            name: "mock-content".to_string(),
            content_capable: true,
            path_capable: false,
            answer: answer.map(str::to_string),
        }
    }

    /// A guesser advertising the legacy path shape.
    pub fn path_based(answer: Option<&str>) -> Self {
        Self {
            name: "mock-path".to_string(),
            content_capable: false,
            path_capable: true,
            answer: answer.map(str::to_string),
        }
    }

    /// A guesser advertising neither shape.
    pub fn unsupported() -> Self {
        Self {
            name: "mock-unsupported".to_string(),
            content_capable: false,
            path_capable: false,
            answer: None,
        }
    }

    /// Overrides the guesser name reported to the classifier.
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

impl MimeGuesser for MockGuesser {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports_content(&self) -> bool {
        self.content_capable
    }

    fn supports_path(&self) -> bool {
        self.path_capable
    }

    fn guess_content(&self, _bytes: &[u8]) -> Option<String> {
        if self.content_capable {
            self.answer.clone()
        } else {
            None
        }
    }

    fn guess_path(&self, _path: &Path) -> Option<String> {
        if self.path_capable {
            self.answer.clone()
        } else {
            None
        }
    }
}
