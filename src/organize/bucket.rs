//! Bucket naming and destination planning.
//!
//! The bucket for a file is its extension taken verbatim; files without a
//! usable extension (no dot, or a bare leading dot like ".env") land in the
//! "unknown" bucket. Planning walks the sorted task list once and assigns
//! every task its final destination up front, so name collisions are resolved
//! deterministically before any worker thread runs.
//!
//! Collision policy:
//! - Two source files landing on the same destination within one run always
//!   get " (n)" suffixes (or a skip, under the skip policy); the plan never
//!   lets one input clobber another.
//! - Files already on disk from earlier runs are handled per OnDuplicate:
//!   overwrite replaces them, rename picks a fresh " (n)" name, skip leaves
//!   them alone and records a skipped outcome.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::config::OnDuplicate;

use super::outcome::{FileTask, Outcome, SkipReason};

/// Bucket for files without a usable extension.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Map a file name to its bucket directory name.
///
/// The extension is used as-is (no lowercasing), so "IMG.JPG" goes to "JPG".
pub fn bucket_name(file_name: &OsStr) -> OsString {
    match Path::new(file_name).extension() {
        Some(ext) if !ext.is_empty() => ext.to_os_string(),
        _ => OsString::from(UNKNOWN_BUCKET),
    }
}

/// A task with its final, claimed destination.
#[derive(Debug, Clone)]
pub struct PlannedCopy {
    pub task: FileTask,
    pub bucket: OsString,
    pub dest: PathBuf,
}

/// Output of planning: copies to execute plus outcomes settled up front.
#[derive(Debug)]
pub struct CopyPlan {
    pub copies: Vec<PlannedCopy>,
    /// Outcomes decided at plan time (duplicate skips).
    pub settled: Vec<Outcome>,
    /// Distinct buckets referenced by the planned copies.
    pub buckets: usize,
}

/// Assign a destination under `output_root` to every task.
///
/// Tasks must arrive in a stable order (discovery sorts by file name); the
/// claimed-name set then makes suffix assignment reproducible across runs.
pub fn plan_destinations(
    tasks: Vec<FileTask>,
    output_root: &Path,
    policy: OnDuplicate,
) -> CopyPlan {
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut buckets: HashSet<OsString> = HashSet::new();
    let mut copies = Vec::with_capacity(tasks.len());
    let mut settled = Vec::new();

    for task in tasks {
        let Some(name) = task.source.file_name().map(OsStr::to_os_string) else {
            // Unreachable for walker-discovered files; keep the accounting anyway.
            settled.push(Outcome::Failed {
                source: task.source,
                error: "source path has no file name component".into(),
            });
            continue;
        };

        let bucket = bucket_name(&name);
        let bucket_dir = output_root.join(&bucket);
        let candidate = bucket_dir.join(&name);

        match policy {
            OnDuplicate::Skip => {
                if claimed.contains(&candidate) || candidate.exists() {
                    trace!(source = %task.source.display(), dest = %candidate.display(), "destination taken; skipping");
                    settled.push(Outcome::Skipped {
                        source: task.source,
                        dest: candidate,
                        reason: SkipReason::Duplicate,
                    });
                    continue;
                }
                claimed.insert(candidate.clone());
                buckets.insert(bucket.clone());
                copies.push(PlannedCopy {
                    task,
                    bucket,
                    dest: candidate,
                });
            }
            OnDuplicate::Overwrite | OnDuplicate::RenameWithSuffix => {
                // Overwrite only dodges names claimed within this run; rename
                // also treats files already on disk as taken.
                let check_disk = policy == OnDuplicate::RenameWithSuffix;
                let dest = if !is_taken(&candidate, &claimed, check_disk) {
                    candidate
                } else {
                    next_free_name(&bucket_dir, &name, &claimed, check_disk)
                };
                claimed.insert(dest.clone());
                buckets.insert(bucket.clone());
                copies.push(PlannedCopy { task, bucket, dest });
            }
        }
    }

    CopyPlan {
        copies,
        settled,
        buckets: buckets.len(),
    }
}

fn is_taken(candidate: &Path, claimed: &HashSet<PathBuf>, check_disk: bool) -> bool {
    claimed.contains(candidate) || (check_disk && candidate.exists())
}

/// Return a free path by appending " (n)" before the extension.
///
/// Examples:
/// - "movie.mkv" -> "movie (2).mkv", "movie (3).mkv", ...
/// - ".env" -> ".env (2)"
/// - "archive.tar.gz" -> "archive.tar (2).gz"
fn next_free_name(
    bucket_dir: &Path,
    name: &OsStr,
    claimed: &HashSet<PathBuf>,
    check_disk: bool,
) -> PathBuf {
    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<OsString> = base.extension().map(|e| e.to_os_string());

    let mut n: u64 = 2;
    let mut collisions = 0u32;
    loop {
        let candidate = bucket_dir.join(name_with_suffix(&stem, ext.as_deref(), n));
        if !is_taken(&candidate, claimed, check_disk) {
            return candidate;
        }
        collisions = collisions.saturating_add(1);
        if collisions == 3 {
            trace!(name = ?name, dir = %bucket_dir.display(), "multiple collisions; continuing to search for a free suffix");
        }
        n = n.saturating_add(1);
    }
}

fn name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, n: u64) -> OsString {
    let mut out = stem.to_os_string();
    out.push(format!(" ({n})"));
    if let Some(e) = ext {
        out.push(".");
        out.push(e);
    }
    out
}
