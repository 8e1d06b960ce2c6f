//! Payload types.

use std::io;
use std::path::{Path, PathBuf};

/// Backing storage of a media payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinarySource {
    /// Content held in an in-memory buffer.
    Buffer(Vec<u8>),
    /// Content stored in an existing file on disk.
    File(PathBuf),
}

/// A binary image payload with its content type attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBinary {
    source: BinarySource,
    mime_type: String,
    format: Option<String>,
}

impl MediaBinary {
    /// Creates a payload from an in-memory buffer.
    pub fn from_buffer(
        data: Vec<u8>,
        mime_type: impl Into<String>,
        format: Option<String>,
    ) -> Self {
        Self {
            source: BinarySource::Buffer(data),
            mime_type: mime_type.into(),
            format,
        }
    }

    /// Creates a payload referencing an existing file on disk.
    pub fn from_file(
        path: impl Into<PathBuf>,
        mime_type: impl Into<String>,
        format: Option<String>,
    ) -> Self {
        Self {
            source: BinarySource::File(path.into()),
            mime_type: mime_type.into(),
            format,
        }
    }

    /// Returns the MIME type attached to this payload.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the format hint (e.g. "jpeg"), if one was attached.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Returns the backing storage of this payload.
    pub fn source(&self) -> &BinarySource {
        &self.source
    }

    /// Whether the payload is backed by a file rather than a buffer.
    pub fn is_file_backed(&self) -> bool {
        matches!(self.source, BinarySource::File(_))
    }

    /// Path of the backing file, if file-backed.
    pub fn file_path(&self) -> Option<&Path> {
        match &self.source {
            BinarySource::File(path) => Some(path),
            BinarySource::Buffer(_) => None,
        }
    }

    /// Whether the payload's content type is one of `types`.
    pub fn is_type_match(&self, types: &[&str]) -> bool {
        types.iter().any(|t| *t == self.mime_type)
    }

    /// Reads the payload content.
    ///
    /// Buffer-backed payloads clone their buffer; file-backed payloads
    /// read the referenced file.
    pub async fn content(&self) -> io::Result<Vec<u8>> {
        match &self.source {
            BinarySource::Buffer(data) => Ok(data.clone()),
            BinarySource::File(path) => tokio::fs::read(path).await,
        }
    }
}
