//! Bundled guesser implementations.

use std::path::Path;

use super::traits::MimeGuesser;

/// Magic-byte guesser backed by the `infer` crate.
#[derive(Debug, Clone, Default)]
pub struct InferGuesser;

impl InferGuesser {
    /// Creates a new magic-byte guesser.
    pub fn new() -> Self {
        Self
    }
}

impl MimeGuesser for InferGuesser {
    fn name(&self) -> &str {
        "infer"
    }

    fn supports_content(&self) -> bool {
        true
    }

    fn guess_content(&self, bytes: &[u8]) -> Option<String> {
        infer::get(bytes).map(|kind| kind.mime_type().to_string())
    }
}

/// Legacy extension-based guesser.
///
/// Only knows common raster and vector image types; anything else is
/// reported as unknown.
#[derive(Debug, Clone, Default)]
pub struct ExtensionGuesser;

impl ExtensionGuesser {
    /// Creates a new extension-based guesser.
    pub fn new() -> Self {
        Self
    }
}

impl MimeGuesser for ExtensionGuesser {
    fn name(&self) -> &str {
        "extension"
    }

    fn supports_path(&self) -> bool {
        true
    }

    fn guess_path(&self, path: &Path) -> Option<String> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let mime = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "avif" => "image/avif",
            "tif" | "tiff" => "image/tiff",
            "bmp" => "image/bmp",
            "ico" => "image/x-icon",
            "svg" => "image/svg+xml",
            _ => return None,
        };
        Some(mime.to_string())
    }
}
