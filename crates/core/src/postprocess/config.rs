//! Construction-time configuration for external-tool processors.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration shared by the external-tool post-processors.
///
/// Immutable after construction; per-call behavior is adjusted only
/// through the validated options map of each `process` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Path to the optimizer executable.
    pub executable: PathBuf,

    /// Root directory for temporary files. Platform default when
    /// absent.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl ToolConfig {
    /// Creates a configuration for the given executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            temp_dir: None,
        }
    }

    /// Sets the temporary root directory.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }
}
