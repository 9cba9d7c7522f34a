//! Source tree discovery.
//!
//! Produces one FileTask per regular file under the source root, in sorted
//! order so planning is deterministic. Non-regular entries (symlinks, fifos,
//! sockets, devices) are counted and left in place; unreadable subtrees
//! become warnings rather than run failures.

use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::shutdown;

use super::outcome::FileTask;

/// What discovery found under the source root.
#[derive(Debug, Default)]
pub struct Discovery {
    pub tasks: Vec<FileTask>,
    pub warnings: Vec<String>,
    /// Non-regular entries left in place.
    pub skipped_special: usize,
}

/// Walk `root` recursively and collect every regular file.
///
/// Symlinks are not followed; a link to a file counts as a special entry.
pub fn discover(root: &Path) -> Discovery {
    let mut discovery = Discovery::default();

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        if shutdown::is_requested() {
            warn!("Shutdown requested during discovery; stopping the scan early");
            discovery
                .warnings
                .push("discovery interrupted; source tree only partially scanned".into());
            break;
        }
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                let msg = format!("source scan: {e}");
                warn!("{msg}");
                discovery.warnings.push(msg);
                continue;
            }
        };
        let ft = entry.file_type();
        if ft.is_dir() {
            continue;
        }
        if !ft.is_file() {
            debug!(path = %entry.path().display(), "skipping non-regular entry");
            discovery.skipped_special += 1;
            continue;
        }
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        discovery.tasks.push(FileTask {
            source: entry.into_path(),
            size,
        });
    }

    debug!(
        files = discovery.tasks.len(),
        special = discovery.skipped_special,
        warnings = discovery.warnings.len(),
        "discovery complete"
    );
    discovery
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_files_recursively_in_sorted_order() {
        let td = tempdir().expect("tempdir");
        let root = td.path();
        fs::create_dir_all(root.join("a")).expect("mkdir");
        fs::write(root.join("b.txt"), b"b").expect("write");
        fs::write(root.join("a.txt"), b"a").expect("write");
        fs::write(root.join("a").join("c.txt"), b"c").expect("write");

        let d = discover(root);
        let found: Vec<_> = d.tasks.iter().map(|t| t.source.clone()).collect();
        assert_eq!(
            found,
            vec![
                root.join("a").join("c.txt"),
                root.join("a.txt"),
                root.join("b.txt"),
            ]
        );
        assert!(d.warnings.is_empty());
        assert_eq!(d.skipped_special, 0);
    }

    #[test]
    fn records_file_sizes() {
        let td = tempdir().expect("tempdir");
        fs::write(td.path().join("four.bin"), b"1234").expect("write");

        let d = discover(td.path());
        assert_eq!(d.tasks.len(), 1);
        assert_eq!(d.tasks[0].size, 4);
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let td = tempdir().expect("tempdir");
        let d = discover(td.path());
        assert!(d.tasks.is_empty());
        assert!(d.warnings.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_count_as_special_entries() {
        let td = tempdir().expect("tempdir");
        let root = td.path();
        fs::write(root.join("real.txt"), b"data").expect("write");
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("link.txt"))
            .expect("symlink");

        let d = discover(root);
        assert_eq!(d.tasks.len(), 1, "only the regular file becomes a task");
        assert_eq!(d.skipped_special, 1);
    }

    #[test]
    fn missing_root_becomes_a_warning() {
        let td = tempdir().expect("tempdir");
        let d = discover(&td.path().join("nope"));
        assert!(d.tasks.is_empty());
        assert_eq!(d.warnings.len(), 1);
    }
}
