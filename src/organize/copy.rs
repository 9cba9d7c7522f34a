//! Per-file copy worker.
//!
//! One planned file at a time: ensure the bucket directory exists, stream to
//! a hidden temp file inside it, fsync, then atomically rename into place.
//! A failure at any step removes the temp file and surfaces as this file's
//! failed outcome; the rest of the run keeps going.

use anyhow::{Context, Result, anyhow};
use std::fs;
use tracing::warn;

use super::atomic::rename_into_place;
use super::bucket::PlannedCopy;
use super::helpers::io_error_with_help;
use super::{io_copy, metadata, util};

/// Copy one planned file into its bucket. Returns the bytes written.
pub fn copy_file(planned: &PlannedCopy) -> Result<u64> {
    let src = &planned.task.source;
    let dest = &planned.dest;
    let bucket_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    // Racing workers may create the bucket at the same time; create_dir_all
    // treats an already-existing directory as success.
    fs::create_dir_all(bucket_dir)
        .map_err(io_error_with_help("create bucket directory", bucket_dir))?;

    // Allocate a unique temp path within the bucket directory.
    let tmp_path = util::unique_temp_path(bucket_dir);

    // Stream the copy (fsyncs the temp file internally).
    let bytes = match io_copy::copy_streaming(src, &tmp_path) {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error_with_help("copy to temporary file", &tmp_path)(e))
                .with_context(|| format!("copy '{}'", src.display()));
        }
    };

    // Atomic rename into the final destination (handles Windows overwrite
    // and Unix directory fsync).
    if let Err(e) = rename_into_place(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!(
                "rename temporary file '{}' -> '{}'",
                tmp_path.display(),
                dest.display()
            )
        });
    }

    // Timestamps, mode bits and (with the xattrs feature) extended attributes
    // follow the data; the copy itself already succeeded, so failures here
    // only warn.
    match fs::metadata(src) {
        Ok(meta) => {
            metadata::preserve_metadata(dest, &meta);
            metadata::preserve_xattrs(src, dest);
        }
        Err(e) => {
            warn!(source = %src.display(), error = %e, "could not stat source for metadata preservation");
        }
    }

    Ok(bytes)
}
