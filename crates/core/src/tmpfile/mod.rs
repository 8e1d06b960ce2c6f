//! Temporary file management for post-processing runs.
//!
//! Every pipeline invocation works on a uniquely named [`TempFile`]
//! that lives exactly as long as that invocation: acquired up front,
//! handed to the external tool, and removed on every exit path. The
//! root directory is resolved per call (override, configured root,
//! platform default) with a best-effort creation step; unique-name
//! allocation itself falls back to the platform default as a last
//! resort.

mod manager;

pub use manager::{TempFile, TempFileError, TempFileManager};
