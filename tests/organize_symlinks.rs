#![cfg(unix)]

use std::fs;
use std::os::unix::fs::symlink;
use tempfile::tempdir;

use filebucket::{Config, organize, validate_and_normalize};

/// Symlinks under the source root are left in place, counted as special,
/// and never followed into a bucket.
#[test]
fn symlinks_are_left_in_place() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("in");
    let output = td.path().join("out");
    fs::create_dir_all(&source).unwrap();

    fs::write(source.join("real.txt"), "real").unwrap();
    symlink(source.join("real.txt"), source.join("alias.txt")).expect("symlink");

    let mut cfg = Config::new(&source, &output);
    validate_and_normalize(&mut cfg).unwrap();
    let report = organize(&cfg).expect("organize should succeed");

    assert_eq!(report.discovered, 1, "only the regular file is discovered");
    assert_eq!(report.copied, 1);
    assert_eq!(report.skipped_special, 1);

    let bucket = output.join("txt");
    assert!(bucket.join("real.txt").exists());
    assert!(!bucket.join("alias.txt").exists(), "symlink must not be copied");
    assert!(source.join("alias.txt").exists(), "symlink stays in the source");
}

/// A symlinked directory is not descended into.
#[test]
fn symlinked_directories_are_not_followed() {
    let td = tempdir().expect("tempdir");
    let source = td.path().join("in");
    let outside = td.path().join("outside");
    let output = td.path().join("out");
    fs::create_dir_all(&source).unwrap();
    fs::create_dir_all(&outside).unwrap();
    fs::write(outside.join("leak.txt"), "outside").unwrap();
    symlink(&outside, source.join("portal")).expect("symlink dir");

    let mut cfg = Config::new(&source, &output);
    validate_and_normalize(&mut cfg).unwrap();
    let report = organize(&cfg).expect("organize should succeed");

    assert_eq!(report.discovered, 0);
    assert_eq!(report.skipped_special, 1);
    assert!(!output.join("txt").exists(), "nothing outside the source may be copied");
}
