//! Binary payload model for image assets.
//!
//! A [`MediaBinary`] carries binary content together with its MIME type
//! and an optional format hint. Content is backed either by an
//! in-memory buffer or by a reference to an existing file on disk.
//! Payloads are never rewritten in place: post-processing always
//! produces a new payload.

mod types;

pub use types::{BinarySource, MediaBinary};
