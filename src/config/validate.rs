//! Config validation logic.
//! Verifies the source root, prepares the output root, and canonicalizes both.
//!
//! Order matters: the source root is checked before the output root is
//! touched, so an invalid source never leaves an empty output directory
//! behind. Failures surface as typed FileBucketError values for the caller's
//! structured error logging.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::FileBucketError;

use super::types::Config;

/// Validate both roots and rewrite them in canonical form.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    // 1) Source root: must exist, be a directory, and be readable.
    let src = &cfg.source_root;
    if !src.exists() {
        return Err(FileBucketError::SourceNotFound(src.clone()).into());
    }
    if !src.is_dir() {
        return Err(FileBucketError::SourceNotADirectory(src.clone()).into());
    }
    if let Err(e) = fs::read_dir(src) {
        return Err(FileBucketError::SourceUnreadable {
            path: src.clone(),
            context: e.to_string(),
        }
        .into());
    }
    debug!("source root readable: {}", src.display());

    // 2) Output root: create if missing; if present it must be a directory.
    let out = &cfg.output_root;
    if out.exists() {
        if !out.is_dir() {
            return Err(FileBucketError::OutputNotADirectory(out.clone()).into());
        }
    } else {
        if let Err(e) = fs::create_dir_all(out) {
            return Err(FileBucketError::OutputNotWritable {
                path: out.clone(),
                context: format!("create failed: {e}"),
            }
            .into());
        }
        info!("Created output root: {}", out.display());
    }
    if let Err(e) = writable_probe(out) {
        return Err(FileBucketError::OutputNotWritable {
            path: out.clone(),
            context: e.to_string(),
        }
        .into());
    }
    debug!("output root writable: {}", out.display());

    // 3) Resolve symlinks and ensure the roots are disjoint (neither contains
    //    the other); a bucket landing inside the scanned tree would be re-read
    //    as new source files on the next run.
    let src_real = canonical_or_same(&cfg.source_root);
    let out_real = canonical_or_same(&cfg.output_root);
    if src_real == out_real || src_real.starts_with(&out_real) || out_real.starts_with(&src_real) {
        return Err(FileBucketError::PathsOverlap {
            source_path: src_real,
            output: out_real,
        }
        .into());
    }

    cfg.source_root = src_real;
    cfg.output_root = out_real;

    info!(
        "Config validated: source='{}' output='{}' log_file='{}'",
        cfg.source_root.display(),
        cfg.output_root.display(),
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into())
    );
    Ok(())
}

fn canonical_or_same(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Quick writable probe: create and remove a small file in `dir`.
/// Uses create_new to avoid clobbering existing files.
fn writable_probe(dir: &Path) -> std::io::Result<()> {
    let probe = dir.join(format!(".filebucket_probe_{}.tmp", std::process::id()));
    match fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
