//! Typed error definitions for filebucket.
//! Provides a small set of well-known failure modes for better logs and tests.
//!
//! These cover the fatal, whole-run failures: an unusable source or output
//! root, overlapping roots, and user interruption. Per-file copy failures are
//! not represented here; they are recorded as failed outcomes in the run
//! report so one bad file never aborts the rest of the run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileBucketError {
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source path is not a directory: {0}")]
    SourceNotADirectory(PathBuf),

    #[error("Source directory not readable: {path}: {context}")]
    SourceUnreadable { path: PathBuf, context: String },

    #[error("Output path exists but is not a directory: {0}")]
    OutputNotADirectory(PathBuf),

    #[error("Output directory not writable: {path}: {context}")]
    OutputNotWritable { path: PathBuf, context: String },

    #[error("Source and output directories overlap: '{source_path}' vs '{output}'")]
    PathsOverlap {
        source_path: PathBuf,
        output: PathBuf,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl FileBucketError {
    /// Stable numeric code for structured logs (field `code`).
    pub fn code(&self) -> i32 {
        match self {
            FileBucketError::SourceNotFound(_) => 10,
            FileBucketError::SourceNotADirectory(_) => 11,
            FileBucketError::SourceUnreadable { .. } => 12,
            FileBucketError::OutputNotADirectory(_) => 20,
            FileBucketError::OutputNotWritable { .. } => 21,
            FileBucketError::PathsOverlap { .. } => 30,
            FileBucketError::Interrupted => 40,
        }
    }
}
