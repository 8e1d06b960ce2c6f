//! Guesser capability trait.

use std::path::Path;

/// A MIME type guessing capability.
///
/// Implementations advertise which guessing shapes they support via
/// the capability predicates; a guesser supporting neither shape is
/// rejected at classifier construction.
pub trait MimeGuesser: Send + Sync {
    /// Returns the name of this guesser implementation.
    fn name(&self) -> &str;

    /// Whether this guesser can classify raw content bytes.
    fn supports_content(&self) -> bool {
        false
    }

    /// Whether this guesser can classify by file path (legacy shape).
    fn supports_path(&self) -> bool {
        false
    }

    /// Guesses the MIME type of raw content bytes.
    fn guess_content(&self, _bytes: &[u8]) -> Option<String> {
        None
    }

    /// Guesses the MIME type from a file path.
    fn guess_path(&self, _path: &Path) -> Option<String> {
        None
    }
}
